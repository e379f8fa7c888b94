//! Conversion between collection item trees and scene directories.

use crate::constants::JSON_EXTENSION;
use crate::error::{Result, WebApiTestError};
use crate::field::Field;
use crate::postman::{Collection, Item, ItemKind, RequestField};
use crate::project::{SceneNode, SceneTree};
use crate::scene::{Case, Scene};
use std::fs;
use std::path::Path;

/// Write every item of a collection under `out_dir`, one directory per folder
/// and one `<name>.json` scene per request.
pub fn collection_to_scene_dir<P: AsRef<Path>>(collection: &Collection, out_dir: P) -> Result<()> {
    let out_dir = out_dir.as_ref();
    log::info!("Converting collection '{}' into {out_dir:?}", collection.info.name);

    fs::create_dir_all(out_dir)?;
    for item in &collection.item {
        write_item(item, out_dir)?;
    }

    Ok(())
}

pub fn write_item(item: &Item, dir: &Path) -> Result<()> {
    if let ItemKind::Folder {
        item: Field::Absent | Field::Null,
        ..
    } = item.kind
    {
        log::debug!("Skipping item {:?}: no request and no children", item.name());
        return Ok(());
    }

    let name = item_name(item)?;
    let file_stem = name.replace(['/', '\\'], "_");
    // hidden entries are skipped when the directory is scanned back
    if file_stem.is_empty() || file_stem.starts_with('.') {
        return Err(WebApiTestError::Conversion(format!(
            "item name '{name}' would be written as a hidden file"
        )));
    }

    match &item.kind {
        ItemKind::Leaf { .. } => {
            let scene = item_to_scene(item)?;
            let file_path = dir.join(format!("{file_stem}.{JSON_EXTENSION}"));
            log::info!("Writing scene '{name}' to {file_path:?}");
            scene.write_to_file(file_path)?;
        }
        ItemKind::Folder { .. } => {
            let folder = dir.join(&file_stem);
            log::info!("Creating folder {folder:?}");
            fs::create_dir_all(&folder)?;
            for child in item.children() {
                write_item(child, &folder)?;
            }
        }
    }

    Ok(())
}

/// Build the scene of a leaf item: one case named after the item, holding the
/// enabled query parameters.
pub fn item_to_scene(item: &Item) -> Result<Scene> {
    let name = item_name(item)?;
    let request = item
        .request()
        .map(RequestField::to_request)
        .ok_or_else(|| WebApiTestError::Conversion(format!("item '{name}' has no request")))?;

    let url = request.get_easy_url()?;
    let case = Case::new(name, request.get_params());

    let mut scene = Scene::new(name, &url, request.method.clone(), vec![case]);
    scene.header = request.header;
    Ok(scene)
}

fn item_name(item: &Item) -> Result<&str> {
    item.name()
        .ok_or_else(|| WebApiTestError::Conversion("collection item without a name".to_string()))
}

/// Items for a scanned scene directory, in scan order.
pub fn scene_tree_to_items(tree: &SceneTree) -> Vec<Item> {
    tree.iter()
        .map(|(name, node)| match node {
            SceneNode::Scene(scene) => Item::leaf(name, RequestField::Structured(scene.to_postman_request())),
            SceneNode::Dir(children) => Item::folder(name, scene_tree_to_items(children)),
        })
        .collect()
}

pub fn scene_tree_to_collection(tree: &SceneTree, name: &str) -> Collection {
    Collection::generated(name, scene_tree_to_items(tree))
}
