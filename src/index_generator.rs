use std::fs;
use std::path::PathBuf;

use spdlog::info;

use crate::content::compiler::write_index;
use crate::content::Node;
use crate::error::{BuildReport, FatalError, SoftError};
use crate::site::Site;
use crate::site_index::SiteIndex;
use crate::view::list_renderer::{ListRenderer, DEFAULT_LIST_TEMPLATE};

/// Listing template of the theme, or the built-in one when the theme has none.
pub fn load_list_renderer(site: &Site) -> Result<ListRenderer<'static>, FatalError> {
    let list_path = site.theme.list_layout();
    let renderer = if list_path.is_file() {
        let source = fs::read_to_string(&list_path)
            .map_err(|e| FatalError::new(&list_path, format!("Cannot load list template: {}", e)))?;
        ListRenderer::new(source)
    } else {
        ListRenderer::new(DEFAULT_LIST_TEMPLATE.to_string())
    };

    renderer.map_err(|e| FatalError::new(&list_path, e.to_string()))
}

/// Writes one listing page per directory of the index, then the site wide
/// listing with every node. Every directory key gets its listing, the content
/// root included. The root listing and the site wide one share
/// `<public>/index.html`; the site wide page is written last and replaces it.
pub fn compile_indexes(site: &Site, index: &SiteIndex, report: &mut BuildReport) -> Result<(), FatalError> {
    let renderer = load_list_renderer(site)?;

    for (directory, nodes) in index.directories() {
        let nodes: Vec<&Node> = nodes.iter().collect();
        match build_index(site, &renderer, directory, &nodes, false) {
            Ok(_) => report.listings += 1,
            Err(e) => report.skip(e),
        }
    }

    let all_nodes = index.all_nodes();
    match build_index(site, &renderer, "", &all_nodes, true) {
        Ok(_) => report.listings += 1,
        Err(e) => report.skip(e),
    }

    Ok(())
}

pub fn build_index(site: &Site, renderer: &ListRenderer, directory: &str, nodes: &[&Node], site_wide: bool) -> Result<PathBuf, SoftError> {
    let page_title = if site_wide || directory.is_empty() {
        site.config.site.title.as_str()
    } else {
        directory
    };

    let mut out_dir = site.public_dir();
    if !site_wide {
        for component in directory.split('/').filter(|c| !c.is_empty()) {
            out_dir.push(component);
        }
    }

    info!("Build index {:?} with {} nodes, site_wide={}", directory, nodes.len(), site_wide);
    let rendered = renderer.render(page_title, nodes, site_wide);
    write_index(&out_dir, &rendered)
}
