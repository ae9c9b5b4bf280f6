//! Test fixtures - reusable declarations for tests.

use appsync::domain::entities::{Application, Pipeline, Service, Value, Webhook};

/// A small declaration: one service with a webhook, two pipelines, a value
pub const TODO_APP: &str = r#"{
  "name": "todo",
  "services": [
    {
      "type": "http",
      "name": "github",
      "webhooks": [
        { "name": "onPush", "output": "singleDoc", "pipeline": [{ "$match": { "ref": "main" } }] }
      ]
    }
  ],
  "pipelines": [
    { "name": "P1", "pipeline": [{ "$literal": 1 }], "parameters": [{ "name": "a", "required": true }] },
    { "name": "P2", "pipeline": [] }
  ],
  "values": [
    { "name": "greeting", "value": "hello" }
  ]
}
"#;

pub fn pipeline(name: &str) -> Pipeline {
    Pipeline {
        name: name.to_string(),
        ..Default::default()
    }
}

pub fn value(name: &str, literal: serde_json::Value) -> Value {
    Value {
        name: name.to_string(),
        value: literal,
    }
}

pub fn http_service(name: &str, hooks: &[&str]) -> Service {
    Service {
        kind: "http".to_string(),
        name: name.to_string(),
        webhooks: hooks
            .iter()
            .map(|hook| Webhook {
                name: hook.to_string(),
                ..Default::default()
            })
            .collect(),
        ..Default::default()
    }
}

/// A declaration named `name` with the given pipelines
pub fn app_with_pipelines(name: &str, pipelines: &[&str]) -> Application {
    Application {
        name: name.to_string(),
        pipelines: pipelines.iter().map(|p| pipeline(p)).collect(),
        ..Default::default()
    }
}

pub fn pipeline_names(app: &Application) -> Vec<String> {
    app.pipelines.iter().map(|p| p.name.clone()).collect()
}
