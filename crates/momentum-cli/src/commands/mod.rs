pub mod config;
pub mod order;
pub mod rank;
pub mod score;
mod store;

use std::io::Read;

use momentum_core::error::Result;
use momentum_core::profile::ProfileInput;
use momentum_core::{Config, OrderRequest, Task, ValidationError};
use serde_json::Value;

/// Read a file, or stdin when `path` is `-`.
pub(crate) fn read_input(path: &str) -> Result<String> {
    if path == "-" {
        let mut buf = String::new();
        std::io::stdin().read_to_string(&mut buf)?;
        Ok(buf)
    } else {
        Ok(std::fs::read_to_string(path)?)
    }
}

/// Give every task object without an `id` a positional one (`task-1`, ...).
pub(crate) fn fill_missing_ids(tasks: &mut [Value]) {
    for (idx, task) in tasks.iter_mut().enumerate() {
        if let Some(obj) = task.as_object_mut() {
            let missing = obj.get("id").map_or(true, |id| id.is_null());
            if missing {
                obj.insert("id".to_string(), Value::String(format!("task-{}", idx + 1)));
            }
        }
    }
}

/// Parse a `{tasks, profile}` document, applying configured profile defaults.
pub(crate) fn parse_order_request(raw: &str, config: &Config) -> Result<OrderRequest> {
    let mut doc: Value = serde_json::from_str(raw)?;
    if !doc.is_object() {
        return Err(invalid("request", "expected an object with tasks and profile").into());
    }

    let mut tasks = match doc.get_mut("tasks").map(Value::take) {
        Some(Value::Array(tasks)) => tasks,
        Some(Value::Null) | None => Vec::new(),
        Some(_) => return Err(invalid("tasks", "expected an array").into()),
    };
    fill_missing_ids(&mut tasks);
    let tasks: Vec<Task> = serde_json::from_value(Value::Array(tasks))?;

    let profile: ProfileInput = match doc.get_mut("profile").map(Value::take) {
        Some(Value::Null) | None => ProfileInput::default(),
        Some(profile) => serde_json::from_value(profile)?,
    };
    let profile = profile.into_profile(config.defaults.start_preference, config.defaults.energy_state);

    let request = OrderRequest::new(tasks, profile);
    request.validate()?;
    Ok(request)
}

fn invalid(field: &str, message: &str) -> ValidationError {
    ValidationError::InvalidValue {
        field: field.to_string(),
        message: message.to_string(),
    }
}
