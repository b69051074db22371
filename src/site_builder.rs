use std::collections::HashMap;
use std::path::{Path, PathBuf};

use spdlog::{debug, info, warn};
use walkdir::WalkDir;

use crate::content::{to_base_directory, Node};
use crate::error::{BuildReport, FatalError, Outcome, SoftError};
use crate::index_generator::compile_indexes;
use crate::site::Site;
use crate::site_index::SiteIndex;
use crate::site_tree::{NodeId, NodeKind, SiteTree};
use crate::util::fs_helper::copy_dir;

/// Result of walking the content root.
pub struct BuiltSite {
    pub index: SiteIndex,
    pub tree: SiteTree,
}

/// Walks the content root depth first, in file name order. Every file is
/// parsed, matched with its templates and compiled before the next entry is
/// visited. Directories are registered in the index even when empty.
pub fn build_node_tree(site: &Site, report: &mut BuildReport) -> Result<BuiltSite, FatalError> {
    let content_dir = site.content_dir();
    if !content_dir.is_dir() {
        return Err(FatalError::new(&content_dir, "Content directory does not exist"));
    }

    let root_name = content_dir.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();

    let mut index = SiteIndex::new();
    let mut tree = SiteTree::new(&root_name);
    let mut tree_dirs: HashMap<PathBuf, NodeId> = HashMap::new();
    tree_dirs.insert(content_dir.clone(), tree.root());

    for entry in WalkDir::new(&content_dir).sort_by_file_name() {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                let path = e.path().unwrap_or(content_dir.as_path()).to_path_buf();
                report.skip(SoftError::new(&path, format!("Cannot visit entry: {}", e)));
                continue;
            }
        };

        let path = entry.path();
        debug!("Visited: {}", path.display());

        let parent = path.parent()
            .and_then(|parent| tree_dirs.get(parent))
            .copied()
            .unwrap_or(tree.root());
        let file_name = entry.file_name().to_string_lossy();

        if entry.file_type().is_dir() {
            let relative = path.strip_prefix(&content_dir).unwrap_or(path);
            index.ensure_directory(&to_base_directory(relative));
            if entry.depth() > 0 {
                let id = tree.add(parent, &file_name, NodeKind::Directory);
                tree_dirs.insert(path.to_path_buf(), id);
            }
            continue;
        }

        match visit_file(site, path)? {
            Ok(node) => {
                debug!("Base Directory {:?}", node.base_directory);
                tree.add(parent, &file_name, NodeKind::Document);
                report.compiled += 1;
                index.push(node);
            }
            Err(e) => report.skip(e),
        }
    }

    Ok(BuiltSite { index, tree })
}

fn visit_file(site: &Site, path: &Path) -> Outcome<Node> {
    let mut node = Node::new(site, path);
    if let Err(e) = node.parse()? {
        return Ok(Err(e));
    }

    node.find_theme(&site.theme);
    if let Err(e) = node.compile(site)? {
        return Ok(Err(e));
    }

    Ok(Ok(node))
}

/// Full build: theme assets, every node, then the listing pages.
pub fn build_site(site: &Site) -> Result<(BuiltSite, BuildReport), FatalError> {
    let mut report = BuildReport::default();

    let asset_dir = site.theme.asset_dir();
    if asset_dir.is_dir() {
        let target = site.public_dir().join("asset");
        match copy_dir(&asset_dir, &target) {
            Ok(copied) => info!("Copied {} theme assets to {}", copied, target.display()),
            Err(e) => report.skip(SoftError::new(&asset_dir, format!("Cannot copy theme assets: {}", e))),
        }
    } else {
        debug!("Theme {} has no asset directory", site.theme.name);
    }

    let built = build_node_tree(site, &mut report)?;
    debug!("Site tree:\n{}", built.tree.outline());
    compile_indexes(site, &built.index, &mut report)?;

    if !report.skipped.is_empty() {
        warn!("{} entries were skipped", report.skipped.len());
    }
    info!("Compiled {} nodes and {} listing pages", report.compiled, report.listings);

    Ok((built, report))
}
