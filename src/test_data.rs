#[cfg(test)]
pub const HELLO_MD: &str = "+++\ntitle = \"Hi\"\n+++\n# Hello";

#[cfg(test)]
pub const POST_WITH_META: &str = r##"+++
title = "Two weeks in Japan"
draft = true
date = 2019-01-02T08:30:00Z
tags = ["travel", "food"]
category = "ignored"
type = "page"
theme = "gallery"
unknown_key = "is fine"
+++
We landed in Osaka on a rainy morning.

## Food

Ramen, *always* ramen.
"##;

#[cfg(test)]
pub const DEFAULT_LAYOUT: &str = r##"<html><head><title>{{ meta.title }}</title></head>
<body>{% block content %}<article>{{ body }}</article>{% endblock %}<footer>{{ permalink|safe }}</footer></body></html>"##;
