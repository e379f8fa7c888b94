use indexmap::IndexMap;
use std::fs;
use tempfile::tempdir;
use webapitest::config::ProjectConfig;
use webapitest::field::Field;
use webapitest::project::Project;
use webapitest::scene::{Case, Scene};
use wiremock::matchers::{body_string, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn case(name: &str, pairs: &[(&str, &str)]) -> Case {
    let params: IndexMap<String, String> = pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
    Case::new(name, params)
}

fn config_for(scene_dir: &std::path::Path, mock_server: &MockServer) -> ProjectConfig {
    let mut config = ProjectConfig::default().with_path(scene_dir);
    config.env.insert("host".to_string(), mock_server.uri());
    config
}

#[tokio::test]
async fn test_run_executes_every_case_and_tolerates_failures() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/items"))
        .and(query_param("page", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_string("page one"))
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/items"))
        .and(query_param("page", "2"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&mock_server)
        .await;
    Mock::given(method("POST"))
        .and(path("/items"))
        .and(body_string("title=hello"))
        .respond_with(ResponseTemplate::new(201))
        .mount(&mock_server)
        .await;

    let dir = tempdir().unwrap();
    Scene::new(
        "list items",
        "{{host}}/items",
        Field::Absent,
        vec![case("first", &[("page", "1")]), case("second", &[("page", "2")])],
    )
    .write_to_file(dir.path().join("list.json"))
    .unwrap();
    Scene::new(
        "create item",
        "{{host}}/items",
        Field::Present("post".to_string()),
        vec![case("hello", &[("title", "hello")])],
    )
    .write_to_file(dir.path().join("create.json"))
    .unwrap();
    fs::write(dir.path().join("zz_broken.json"), "{").unwrap();

    let project = Project::new(config_for(dir.path(), &mock_server)).unwrap();
    let results = project.run().await.unwrap();

    assert_eq!(results.len(), 4);
    // the broken file is reported first, while the directory is scanned
    assert!(!results[0].success);
    assert!(results[0].error.is_some());

    let outcome: Vec<(&str, &str, bool)> = results[1..]
        .iter()
        .map(|r| (r.scene_name.as_str(), r.case_name.as_str(), r.success))
        .collect();
    assert_eq!(
        outcome,
        vec![
            ("create item", "hello", true),
            ("list items", "first", true),
            ("list items", "second", false),
        ]
    );
    assert_eq!(results[2].response.as_ref().unwrap().body, "page one");
}

#[tokio::test]
async fn test_login_cookie_is_sent_by_scenes_of_that_user() {
    let mock_server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/login"))
        .and(body_string("name=admin"))
        .respond_with(
            ResponseTemplate::new(302).append_header("Set-Cookie", "session=admin-token; HttpOnly; Path=/"),
        )
        .mount(&mock_server)
        .await;
    Mock::given(method("POST"))
        .and(path("/login"))
        .and(body_string("name=nobody"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/me"))
        .and(header("Cookie", "session=admin-token"))
        .respond_with(ResponseTemplate::new(200).set_body_string("admin"))
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/me"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&mock_server)
        .await;

    let root = tempdir().unwrap();
    let scene_dir = root.path().join("cases");
    fs::create_dir(&scene_dir).unwrap();

    let login_scene = root.path().join("login.json");
    Scene::new(
        "login",
        "{{host}}/login",
        Field::Present("POST".to_string()),
        vec![case("admin", &[("name", "admin")]), case("nobody", &[("name", "nobody")])],
    )
    .write_to_file(&login_scene)
    .unwrap();

    let mut as_admin = Scene::new("me as admin", "{{host}}/me", Field::Absent, vec![case("me", &[])]);
    as_admin.user = Some("admin".to_string());
    as_admin.write_to_file(scene_dir.join("admin.json")).unwrap();

    let mut as_nobody = Scene::new("me as nobody", "{{host}}/me", Field::Absent, vec![case("me", &[])]);
    as_nobody.user = Some("nobody".to_string());
    as_nobody.write_to_file(scene_dir.join("nobody.json")).unwrap();

    let mut config = config_for(&scene_dir, &mock_server);
    config.login_scene = Some(login_scene);

    let mut project = Project::new(config.clone()).unwrap();
    project.load_cookie().await.unwrap();
    assert_eq!(project.cookies().get("admin"), Some("session=admin-token"));
    assert_eq!(project.cookies().get("nobody"), None);

    let results = project.run().await.unwrap();
    assert_eq!(results.len(), 2);
    assert!(results[0].success, "admin scene should be authenticated");
    assert!(!results[1].success, "nobody scene runs anonymously");

    // cookies persist for later runs without a login scene
    assert!(scene_dir.join(".cookies.json").is_file());
    config.login_scene = None;
    let mut later = Project::new(config).unwrap();
    later.load_cookie().await.unwrap();
    assert_eq!(later.cookies().get("admin"), Some("session=admin-token"));
}
