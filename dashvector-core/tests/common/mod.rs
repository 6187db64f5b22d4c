//! In-memory stand-ins for the DashVector service.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use dashvector_core::{Client, Method, ReadinessPoller, Result, Transport};
use parking_lot::Mutex;
use serde_json::{json, Value};

/// One request seen by a [`MockTransport`].
#[derive(Debug, Clone)]
pub struct Call {
    pub method: Method,
    pub path: String,
    pub body: Option<Value>,
}

type Handler = Box<dyn Fn(Method, &str, Option<&Value>) -> Value + Send + Sync>;

/// Transport answering every request through a closure and recording it.
pub struct MockTransport {
    handler: Handler,
    calls: Mutex<Vec<Call>>,
}

impl MockTransport {
    pub fn new<F>(handler: F) -> Self
    where
        F: Fn(Method, &str, Option<&Value>) -> Value + Send + Sync + 'static,
    {
        Self {
            handler: Box::new(handler),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Answers every request with `reply`.
    pub fn replying(reply: Value) -> Self {
        Self::new(move |_, _, _| reply.clone())
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().len()
    }

    pub fn last_call(&self) -> Option<Call> {
        self.calls.lock().last().cloned()
    }
}

impl Transport for MockTransport {
    fn send(&self, method: Method, path: &str, body: Option<Vec<u8>>) -> Result<Vec<u8>> {
        let body: Option<Value> = body.map(|b| serde_json::from_slice(&b).unwrap());
        self.calls.lock().push(Call {
            method,
            path: path.to_string(),
            body: body.clone(),
        });
        let reply = (self.handler)(method, path, body.as_ref());
        Ok(serde_json::to_vec(&reply).unwrap())
    }
}

type RawHandler = Box<dyn Fn(usize, &str) -> Result<Vec<u8>> + Send + Sync>;

/// Transport handing back raw bytes or errors, given the zero-based call
/// index and the path. Used where the service misbehaves.
pub struct RawTransport {
    handler: RawHandler,
    calls: Mutex<usize>,
}

impl RawTransport {
    pub fn new<F>(handler: F) -> Self
    where
        F: Fn(usize, &str) -> Result<Vec<u8>> + Send + Sync + 'static,
    {
        Self {
            handler: Box::new(handler),
            calls: Mutex::new(0),
        }
    }

    pub fn call_count(&self) -> usize {
        *self.calls.lock()
    }
}

impl Transport for RawTransport {
    fn send(&self, _method: Method, path: &str, _body: Option<Vec<u8>>) -> Result<Vec<u8>> {
        let index = {
            let mut calls = self.calls.lock();
            *calls += 1;
            *calls - 1
        };
        (self.handler)(index, path)
    }
}

/// Client over `transport` with a 1ms poll interval.
pub fn client_with<T: Transport + 'static>(transport: &Arc<T>) -> Client {
    let shared: Arc<dyn Transport> = transport.clone();
    Client::with_transport(shared)
        .with_poller(ReadinessPoller::new().with_interval(Duration::from_millis(1)))
}

pub fn ok(output: Value) -> Value {
    json!({"code": 0, "message": "", "request_id": "req-1", "output": output})
}

#[derive(Default)]
struct CollectionState {
    meta: Value,
    describes_until_serving: u32,
    partitions: HashMap<String, HashMap<String, Value>>,
}

/// A small fake of the service: collections, partitions and documents kept
/// in memory. A new collection reports `INITIALIZED` for its first two
/// describes and `SERVING` afterwards.
pub fn fake_server() -> MockTransport {
    let state: Mutex<HashMap<String, CollectionState>> = Mutex::new(HashMap::new());
    let next_id = Mutex::new(0u64);

    MockTransport::new(move |method, path, body| {
        let (route, query) = match path.split_once('?') {
            Some((route, query)) => (route, query),
            None => (path, ""),
        };
        let segments: Vec<&str> = route.trim_start_matches('/').split('/').collect();
        let mut collections = state.lock();

        match (method, segments.as_slice()) {
            (Method::Post, ["collections"]) => {
                let body = body.cloned().unwrap_or_default();
                let name = body["name"].as_str().unwrap_or_default().to_string();
                if collections.contains_key(&name) {
                    return json!({"code": -2021, "message": "collection exists", "request_id": "req-dup"});
                }
                let mut meta = body;
                meta["partitions"] = json!({"default": "SERVING"});
                let mut partitions = HashMap::new();
                partitions.insert("default".to_string(), HashMap::new());
                collections.insert(
                    name,
                    CollectionState {
                        meta,
                        describes_until_serving: 2,
                        partitions,
                    },
                );
                ok(Value::Null)
            }
            (Method::Get, ["collections", name]) => match collections.get_mut(*name) {
                Some(c) => {
                    let status = if c.describes_until_serving > 0 {
                        c.describes_until_serving -= 1;
                        "INITIALIZED"
                    } else {
                        "SERVING"
                    };
                    let mut meta = c.meta.clone();
                    meta["status"] = json!(status);
                    ok(meta)
                }
                None => json!({"code": -2020, "message": "collection not exist"}),
            },
            (Method::Post, ["collections", name, "partitions"]) => {
                let Some(c) = collections.get_mut(*name) else {
                    return json!({"code": -2020, "message": "collection not exist"});
                };
                let partition = body.and_then(|b| b["name"].as_str()).unwrap_or_default();
                c.partitions.entry(partition.to_string()).or_default();
                ok(Value::Null)
            }
            (Method::Get, ["collections", name, "partitions", partition]) => {
                match collections.get(*name).and_then(|c| c.partitions.get(*partition)) {
                    Some(_) => ok(json!("SERVING")),
                    None => json!({"code": -2023, "message": "partition not exist"}),
                }
            }
            (Method::Post, ["collections", name, "docs", ..]) | (Method::Put, ["collections", name, "docs"]) => {
                let Some(c) = collections.get_mut(*name) else {
                    return json!({"code": -2020, "message": "collection not exist"});
                };
                let body = body.cloned().unwrap_or_default();
                let partition = body["partition"].as_str().unwrap_or("default").to_string();
                let op = match (method, segments.len()) {
                    (Method::Put, _) => "update",
                    (_, 4) => "upsert",
                    _ => "insert",
                };
                let docs = c.partitions.entry(partition).or_default();
                let mut results = Vec::new();
                for mut doc in body["docs"].as_array().cloned().unwrap_or_default() {
                    let id = match doc["id"].as_str() {
                        Some(id) => id.to_string(),
                        None => {
                            let mut next = next_id.lock();
                            *next += 1;
                            format!("auto-{}", *next)
                        }
                    };
                    doc["id"] = json!(id);
                    docs.insert(id.clone(), doc);
                    results.push(json!({"id": id, "code": 0, "message": "", "doc_op": op}));
                }
                let count = results.len();
                json!({
                    "code": 0,
                    "message": "",
                    "request_id": "req-write",
                    "output": results,
                    "usage": {"write_units": count},
                })
            }
            (Method::Get, ["collections", name, "docs"]) => {
                let params: HashMap<String, String> = url::form_urlencoded::parse(query.as_bytes())
                    .into_owned()
                    .collect();
                let partition = params.get("partition").map_or("default", String::as_str);
                let found: serde_json::Map<String, Value> = params
                    .get("ids")
                    .map(|ids| ids.split(',').collect::<Vec<_>>())
                    .unwrap_or_default()
                    .into_iter()
                    .filter_map(|id| {
                        collections
                            .get(*name)
                            .and_then(|c| c.partitions.get(partition))
                            .and_then(|docs| docs.get(id))
                            .map(|doc| (id.to_string(), doc.clone()))
                    })
                    .collect();
                let count = found.len();
                json!({
                    "code": 0,
                    "message": "",
                    "request_id": "req-get",
                    "output": found,
                    "usage": {"read_units": count},
                })
            }
            (Method::Delete, ["collections", name, "docs"]) => {
                let Some(c) = collections.get_mut(*name) else {
                    return json!({"code": -2020, "message": "collection not exist"});
                };
                let body = body.cloned().unwrap_or_default();
                let partition = body["partition"].as_str().unwrap_or("default").to_string();
                let docs = c.partitions.entry(partition).or_default();
                if body["delete_all"].as_bool() == Some(true) {
                    docs.clear();
                    return json!({"code": 0, "message": "", "request_id": "req-drop", "output": []});
                }
                let results: Vec<Value> = body["ids"]
                    .as_array()
                    .cloned()
                    .unwrap_or_default()
                    .into_iter()
                    .filter_map(|id| id.as_str().map(str::to_string))
                    .filter(|id| docs.remove(id).is_some())
                    .map(|id| json!({"id": id, "code": 0, "message": "", "doc_op": "delete"}))
                    .collect();
                ok(Value::Array(results))
            }
            _ => json!({"code": -1, "message": format!("unsupported {method} {path}")}),
        }
    })
}
