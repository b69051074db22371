use std::io;
use std::io::ErrorKind;

use ramhorns::Template;

use crate::content::Node;

pub const DEFAULT_LIST_TEMPLATE: &str = r##"<!DOCTYPE html>
<html>
<head>
<meta charset="utf-8">
<title>{{page_title}}</title>
</head>
<body>
<h1>{{page_title}}</h1>
<ul>
{{#items}}{{^draft}}<li><a href="{{permalink}}">{{title}}</a> <time>{{date}}</time>{{#tags}} <span class="tag">{{tag}}</span>{{/tags}}</li>
{{/draft}}{{/items}}</ul>
</body>
</html>
"##;

#[derive(ramhorns::Content)]
struct ListPage<'a> {
    page_title: &'a str,
    site_wide: bool,
    items: Vec<ListItem<'a>>,
}

#[derive(ramhorns::Content)]
struct ListItem<'a> {
    title: &'a str,
    permalink: String,
    date: &'a str,
    category: &'a str,
    tags: Vec<ViewTag<'a>>,
    draft: bool,
    page: bool,
}

#[derive(ramhorns::Content)]
struct ViewTag<'a> {
    tag: &'a str,
}

pub struct ListRenderer<'a> {
    pub template: Template<'a>,
}

impl<'a> ListRenderer<'a> {
    pub fn new(list_tpl_src: String) -> io::Result<ListRenderer<'a>> {
        let template = match Template::new(list_tpl_src) {
            Ok(x) => x,
            Err(e) => {
                return Err(io::Error::new(ErrorKind::InvalidInput, format!("Error parsing list template: {}", e)));
            }
        };

        Ok(ListRenderer {
            template,
        })
    }

    pub fn render(&self, page_title: &str, nodes: &[&Node], site_wide: bool) -> String {
        let mut items = vec![];
        for node in nodes {
            let Some(ref meta) = node.meta else {
                continue;
            };

            let title = if meta.title.is_empty() { node.name.as_str() } else { meta.title.as_str() };
            items.push(ListItem {
                title,
                permalink: node.permalink(),
                date: meta.date_formatted.as_str(),
                category: meta.category.as_str(),
                tags: meta.tags.iter().map(|t| ViewTag { tag: t.as_str() }).collect(),
                draft: meta.draft,
                page: node.is_page(),
            });
        }

        self.template.render(&ListPage {
            page_title,
            site_wide,
            items,
        })
    }
}
