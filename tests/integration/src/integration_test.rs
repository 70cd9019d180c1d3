//! End-to-end tests: settings on disk, a shared recorder with a notifier,
//! and parsers built per request.

use mention_config::{MentionSettings, ResolvedConfig};
use mention_model::{
    Author, Directory, EntityRef, HasMentions, Identity, IdentityId, MentionRecord,
    MentionRecorder, Notifier,
};
use mention_model::{InMemoryRecorder, Result as ModelResult};
use mention_parser::MentionParser;
use mention_test_utils::{TestPost, seeded_directory};
use pretty_assertions::assert_eq;
use serde_json::{Value, json};
use std::fs;
use std::path::Path;
use std::sync::{Arc, Mutex};
use tempfile::TempDir;

const BASE_SETTINGS: &str = r#"
[defaults]
notify = true

[pools.users]
route = "/users/profile/"

[pools.teams]
route = "/teams/"
"#;

const LOCAL_SETTINGS: &str = r#"
[defaults]
mention_self = false
notify = false

[pools.users]
route = "https://forum.example/u/"
"#;

fn write_settings(dir: &Path) {
    fs::write(dir.join("mentions.toml"), BASE_SETTINGS).unwrap();
    fs::write(dir.join("mentions.local.toml"), LOCAL_SETTINGS).unwrap();
}

fn load_layered(dir: &Path) -> MentionSettings {
    let mut settings = MentionSettings::load(&dir.join("mentions.toml")).unwrap();
    let local = MentionSettings::load(&dir.join("mentions.local.toml")).unwrap();
    settings.merge(&local);
    settings
}

#[derive(Default)]
struct Inbox {
    delivered: Mutex<Vec<(String, bool)>>,
}

impl Notifier for Inbox {
    fn notify(&self, record: &MentionRecord, recipient: &Identity) -> ModelResult<()> {
        self.delivered
            .lock()
            .unwrap()
            .push((recipient.name.clone(), record.notified));
        Ok(())
    }
}

#[test]
fn layered_settings_drive_routes_and_options() {
    let temp = TempDir::new().unwrap();
    write_settings(temp.path());
    let settings = load_layered(temp.path());

    let config = settings.resolve(&Value::Null).unwrap();

    assert_eq!(config.route(), "https://forum.example/u/");
    assert!(!config.notify());
    assert!(!config.mention_self());

    let directory = seeded_directory();
    let post = TestPost::new("1");
    let parser = MentionParser::new(&post, &directory, config)
        .with_current_actor(Some(IdentityId::new("users", "3")));

    let output = parser.parse("great work @mario and @luigi").unwrap();

    assert_eq!(
        output,
        "great work [@Mario](https://forum.example/u/Mario) and [@Luigi](https://forum.example/u/Luigi)"
    );
    assert_eq!(post.recorded_keys(), vec!["4".to_string()]);
}

#[test]
fn caller_overrides_win_over_settings_file() {
    let temp = TempDir::new().unwrap();
    write_settings(temp.path());
    let settings = load_layered(temp.path());

    let config = settings
        .resolve(&json!({ "pool": "teams", "notify": true }))
        .unwrap();

    assert_eq!(config.route(), "/teams/");
    assert!(config.notify());
}

#[test]
fn missing_pool_in_settings_fails_at_resolution() {
    let settings = MentionSettings::parse(BASE_SETTINGS).unwrap();

    let result = settings.resolve(&json!({ "pool": "groups" }));

    assert!(matches!(
        result,
        Err(mention_config::Error::MissingPool { ref pool }) if pool == "groups"
    ));
}

#[test]
fn notifier_receives_each_recorded_mention() {
    let inbox = Arc::new(Inbox::default());
    let recorder = Arc::new(InMemoryRecorder::new().with_notifier(inbox.clone()));
    let post = Author::new(EntityRef::new("post", "7"), recorder.clone());
    let directory = seeded_directory();
    let config = MentionSettings::parse(BASE_SETTINGS)
        .unwrap()
        .resolve(&Value::Null)
        .unwrap();

    MentionParser::new(&post, &directory, config)
        .parse("hi @admin2, @admin and @admin2")
        .unwrap();

    let delivered = inbox.delivered.lock().unwrap().clone();
    assert_eq!(
        delivered,
        vec![
            ("admin2".to_string(), true),
            ("admin".to_string(), true),
            ("admin2".to_string(), true),
        ]
    );
    assert_eq!(recorder.len().unwrap(), 3);
}

#[test]
fn authors_list_their_own_mentions_across_parses() {
    let recorder = Arc::new(InMemoryRecorder::new());
    let first = TestPost::with_recorder("1", recorder.clone());
    let second = TestPost::with_recorder("2", recorder.clone());
    let directory = seeded_directory();
    let config = MentionSettings::parse(BASE_SETTINGS)
        .unwrap()
        .resolve(&Value::Null)
        .unwrap();

    MentionParser::new(&first, &directory, config.clone())
        .parse("hi @luigi")
        .unwrap();
    MentionParser::new(&second, &directory, config.clone())
        .parse("hi @mario and @admin")
        .unwrap();
    MentionParser::new(&first, &directory, config)
        .parse("and again @admin")
        .unwrap();

    let first_names: Vec<_> = first
        .mentioned(&directory)
        .unwrap()
        .into_iter()
        .map(|identity| identity.name)
        .collect();
    assert_eq!(first_names, vec!["luigi".to_string(), "admin".to_string()]);
    assert_eq!(second.mentions().unwrap().len(), 2);
    assert_eq!(recorder.len().unwrap(), 4);
}

#[test]
fn one_parser_serves_concurrent_parses() {
    let recorder: Arc<dyn MentionRecorder> = Arc::new(InMemoryRecorder::new());
    let post = Author::new(EntityRef::new("post", "1"), recorder);
    let directory = seeded_directory();
    let config: ResolvedConfig = MentionSettings::parse(BASE_SETTINGS)
        .unwrap()
        .resolve(&Value::Null)
        .unwrap();
    let parser = MentionParser::new(&post, &directory, config);

    let outputs: Vec<String> = std::thread::scope(|scope| {
        let handles: Vec<_> = (0..4)
            .map(|_| scope.spawn(|| parser.parse("hi @luigi").unwrap()))
            .collect();
        handles
            .into_iter()
            .map(|handle| handle.join().unwrap())
            .collect()
    });

    assert!(
        outputs
            .iter()
            .all(|output| output == "hi [@Luigi](/users/profile/Luigi)")
    );
    assert_eq!(post.mentions().unwrap().len(), 4);
}

#[test]
fn directory_trait_objects_are_interchangeable() {
    let directory = seeded_directory();
    let dynamic: &dyn Directory = &directory;
    let post = TestPost::new("1");
    let config = MentionSettings::parse(BASE_SETTINGS)
        .unwrap()
        .resolve(&json!({ "character": "#" }))
        .unwrap();

    let matches = MentionParser::new(&post, dynamic, config)
        .matches_from_input("tags: #mario #admin2")
        .unwrap();

    let keys: Vec<_> = matches.into_iter().map(|identity| identity.id.key).collect();
    assert_eq!(keys, vec!["3".to_string(), "2".to_string()]);
    assert!(post.recorded().is_empty());
}
