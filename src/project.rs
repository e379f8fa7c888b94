//! Scene directory driver: traversal, execution, login cookies and csv maintenance.

use crate::config::ProjectConfig;
use crate::constants::{CSV_EXTENSION, JSON_EXTENSION};
use crate::convert::{collection_to_scene_dir, scene_tree_to_collection, scene_tree_to_items};
use crate::cookies::{extract_cookie, CookieJar};
use crate::csv_table::write_csv;
use crate::error::{Result, WebApiTestError};
use crate::executor::{execute_request, execute_scene};
use crate::models::ExecutionResult;
use crate::postman::{Collection, Item};
use crate::scene::Scene;
use indexmap::IndexMap;
use reqwest::Client;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Scanned scene directory: directories by name, scenes by scene name.
pub type SceneTree = IndexMap<String, SceneNode>;

#[derive(Debug, Clone, PartialEq)]
pub enum SceneNode {
    Scene(Scene),
    Dir(SceneTree),
}

/// Which files a traversal loads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanTarget {
    Json,
    Csv,
}

impl ScanTarget {
    pub fn extension(&self) -> &'static str {
        match self {
            ScanTarget::Json => JSON_EXTENSION,
            ScanTarget::Csv => CSV_EXTENSION,
        }
    }
}

impl FromStr for ScanTarget {
    type Err = WebApiTestError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            JSON_EXTENSION => Ok(ScanTarget::Json),
            CSV_EXTENSION => Ok(ScanTarget::Csv),
            other => Err(WebApiTestError::UnknownTarget(other.to_string())),
        }
    }
}

pub struct Project {
    config: ProjectConfig,
    cookies: CookieJar,
    client: Client,
}

impl Project {
    /// Open the project and its stored cookies.
    pub fn new(config: ProjectConfig) -> Result<Self> {
        let cookies = CookieJar::load(config.cookie_store_path())?;
        let client = Client::builder().redirect(reqwest::redirect::Policy::none()).build()?;

        Ok(Project { config, cookies, client })
    }

    pub fn path(&self) -> &Path {
        &self.config.path
    }

    pub fn config(&self) -> &ProjectConfig {
        &self.config
    }

    pub fn cookies(&self) -> &CookieJar {
        &self.cookies
    }

    /// Walk the scene directory depth-first in file name order and hand every
    /// `.json` or `.csv` file to `visitor`. Hidden entries are skipped.
    ///
    /// Returned scenes are keyed by scene name; on a name collision within a
    /// directory the first scene is kept.
    pub fn scan<F>(&self, target: &str, mut visitor: F) -> Result<SceneTree>
    where
        F: FnMut(&Path) -> Result<Option<Scene>>,
    {
        let target: ScanTarget = target.parse()?;

        let mut tree = SceneTree::new();
        walk(&self.config.path, target, &mut visitor, &mut tree)?;
        Ok(tree)
    }

    /// Load every scene of the directory.
    pub fn load_structure(&self) -> Result<SceneTree> {
        self.scan(JSON_EXTENSION, |path| Scene::load_from_file(path).map(Some))
    }

    pub fn scene_items(&self) -> Result<Vec<Item>> {
        Ok(scene_tree_to_items(&self.load_structure()?))
    }

    pub fn to_collection(&self, name: &str) -> Result<Collection> {
        Ok(scene_tree_to_collection(&self.load_structure()?, name))
    }

    /// Log every case of the login scene in and keep the session cookie of each
    /// user (the case name). A user whose login fails is dropped from the jar.
    ///
    /// Without a login scene the stored cookies are used as they are.
    pub async fn load_cookie(&mut self) -> Result<()> {
        let Some(login_scene) = self.config.login_scene.clone() else {
            log::info!("No login scene configured, using {} stored cookie(s)", self.cookies.len());
            return Ok(());
        };

        let mut scene = Scene::load_from_file(&login_scene)?;
        scene.set_envs(self.config.envs());

        for request in scene.prepare_requests() {
            let user = request.case_name.clone();

            let cookie = match execute_request(&self.client, &request).await {
                Ok(response) => extract_cookie(&self.config.cookie_key, &response.set_cookies)?,
                Err(e) => {
                    log::warn!("Login request of user '{user}' failed: {e}");
                    None
                }
            };

            match cookie {
                Some(cookie) => {
                    log::info!("Logged in user '{user}', later scenes may use it");
                    self.cookies.insert(&user, cookie);
                }
                None => {
                    log::warn!("Failed to log in user '{user}', scenes using it run anonymously");
                    self.cookies.remove(&user);
                }
            }
        }

        self.cookies.save(self.config.cookie_store_path())
    }

    /// Execute every scene of the directory. A scene that cannot be loaded is
    /// reported as failed and the run goes on.
    pub async fn run(&self) -> Result<Vec<ExecutionResult>> {
        let mut results = Vec::new();

        let mut tree = self.scan(JSON_EXTENSION, |path| match Scene::load_from_file(path) {
            Ok(scene) => Ok(Some(scene)),
            Err(e) => {
                log::error!("Skipping scene {path:?}: {e}");
                results.push(ExecutionResult::failed(&path.display().to_string(), "-", e.to_string()));
                Ok(None)
            }
        })?;

        let envs = self.config.envs();
        for scene in scenes_mut(&mut tree) {
            scene.set_envs(envs.clone());
            let user_cookie = scene
                .user
                .as_deref()
                .and_then(|user| self.cookies.get(user))
                .map(str::to_string);
            scene.set_user_cookie(user_cookie);

            results.extend(execute_scene(&self.client, scene).await);
        }

        Ok(results)
    }

    /// Write a `.csv` sibling for every scene.
    pub fn create_csv(&self) -> Result<SceneTree> {
        self.scan(JSON_EXTENSION, |path| {
            let scene = Scene::load_from_file(path)?;
            write_csv(path.with_extension(CSV_EXTENSION), &scene.to_csv())?;
            Ok(Some(scene))
        })
    }

    /// Load every csv overlay, failing on the first one that does not load.
    pub fn check_csv(&self) -> Result<SceneTree> {
        self.scan(CSV_EXTENSION, |path| {
            let scene = Scene::load_from_csv(path)?;
            log::info!("{path:?} is valid: {} case(s)", scene.cases.len());
            Ok(Some(scene))
        })
    }

    /// Rewrite every scene file from its csv overlay.
    pub fn reset_json_by_csv(&self) -> Result<SceneTree> {
        self.scan(CSV_EXTENSION, |path| {
            let scene = Scene::load_from_csv(path)?;
            scene.write_to_file(path.with_extension(JSON_EXTENSION))?;
            Ok(Some(scene))
        })
    }
}

fn walk<F>(dir: &Path, target: ScanTarget, visitor: &mut F, tree: &mut SceneTree) -> Result<()>
where
    F: FnMut(&Path) -> Result<Option<Scene>>,
{
    let mut entries: Vec<PathBuf> = fs::read_dir(dir)?
        .map(|entry| entry.map(|entry| entry.path()))
        .collect::<std::io::Result<_>>()?;
    entries.sort();

    for path in entries {
        let Some(file_name) = path.file_name().and_then(|name| name.to_str()) else {
            continue;
        };
        if file_name.starts_with('.') {
            continue;
        }

        if path.is_dir() {
            log::info!("Scanning directory {path:?}");
            let node = tree
                .entry(file_name.to_string())
                .or_insert_with(|| SceneNode::Dir(SceneTree::new()));

            match node {
                SceneNode::Dir(children) => walk(&path, target, visitor, children)?,
                SceneNode::Scene(_) => log::warn!("Directory {path:?} has the name of a scene, skipped"),
            }
        } else if path.extension().is_some_and(|extension| extension == target.extension()) {
            log::info!("Loading file {path:?}");
            if let Some(scene) = visitor(&path)? {
                insert_scene(tree, scene, &path);
            }
        }
    }

    Ok(())
}

fn insert_scene(tree: &mut SceneTree, scene: Scene, path: &Path) {
    if tree.contains_key(&scene.name) {
        log::warn!("Scene name '{}' of {path:?} is already taken, skipped", scene.name);
        return;
    }
    tree.insert(scene.name.clone(), SceneNode::Scene(scene));
}

/// Scenes in traversal order.
fn scenes_mut(tree: &mut SceneTree) -> Vec<&mut Scene> {
    let mut scenes = Vec::new();
    for node in tree.values_mut() {
        match node {
            SceneNode::Scene(scene) => scenes.push(scene),
            SceneNode::Dir(children) => scenes.extend(scenes_mut(children)),
        }
    }
    scenes
}

/// Convert a collection file into a scene directory.
pub fn parse_collection_to_scene_dir<P: AsRef<Path>, Q: AsRef<Path>>(
    collection_path: P,
    casedir: Q,
) -> Result<Collection> {
    let collection = Collection::load_from_file(collection_path)?;
    collection_to_scene_dir(&collection, casedir)?;
    Ok(collection)
}

/// Convert a scene directory into a collection file. The collection is named
/// after the directory unless `name` is given. No request is sent.
pub fn parse_scene_dir_to_collection<P: AsRef<Path>, Q: AsRef<Path>>(
    casedir: P,
    collection_path: Q,
    name: Option<&str>,
) -> Result<Collection> {
    let casedir = casedir.as_ref();
    let name = match name {
        Some(name) => name.to_string(),
        None => casedir
            .canonicalize()?
            .file_name()
            .and_then(|name| name.to_str())
            .map(str::to_string)
            .ok_or_else(|| WebApiTestError::Conversion(format!("cannot name a collection after {casedir:?}")))?,
    };

    let project = Project::new(ProjectConfig::default().with_path(casedir))?;
    let collection = project.to_collection(&name)?;
    collection.write_to_file(collection_path)?;
    Ok(collection)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_scan_target_from_str() {
        assert_eq!("json".parse::<ScanTarget>().unwrap(), ScanTarget::Json);
        assert_eq!("csv".parse::<ScanTarget>().unwrap(), ScanTarget::Csv);
        assert!(matches!("xml".parse::<ScanTarget>(), Err(WebApiTestError::UnknownTarget(_))));
    }

    #[test]
    fn test_unknown_target_fails_before_touching_the_directory() {
        let project = Project::new(ProjectConfig::default().with_path("/nonexistent/scenes")).unwrap();
        let mut visited = false;

        let result = project.scan("xml", |_| {
            visited = true;
            Ok(None)
        });

        assert!(matches!(result, Err(WebApiTestError::UnknownTarget(target)) if target == "xml"));
        assert!(!visited);
    }

    #[test]
    fn test_stored_cookies_are_used_without_login_scene() {
        let dir = tempdir().unwrap();
        let mut jar = CookieJar::default();
        jar.insert("admin", "session=stored".to_string());
        jar.save(dir.path().join(".cookies.json")).unwrap();

        let mut project = Project::new(ProjectConfig::default().with_path(dir.path())).unwrap();
        tokio_test::block_on(project.load_cookie()).unwrap();

        assert_eq!(project.cookies().get("admin"), Some("session=stored"));
    }

    #[test]
    fn test_first_scene_with_a_name_wins() {
        let dir = tempdir().unwrap();
        Scene::new("same", "http://a/1", Default::default(), vec![])
            .write_to_file(dir.path().join("a.json"))
            .unwrap();
        Scene::new("same", "http://b/2", Default::default(), vec![])
            .write_to_file(dir.path().join("b.json"))
            .unwrap();

        let project = Project::new(ProjectConfig::default().with_path(dir.path())).unwrap();
        let tree = project.load_structure().unwrap();

        assert_eq!(tree.len(), 1);
        let Some(SceneNode::Scene(scene)) = tree.get("same") else {
            panic!("expected a scene");
        };
        assert_eq!(scene.url, "http://a/1");
    }
}
