use std::collections::HashMap;
use std::convert::Infallible;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use warp::reply::Json;
use warp::Filter;

use crate::ops::Ledger;
use crate::store::MemoryStore;

/// One ledger invocation: an operation name plus its ordered string
/// arguments, the invocation surface the original deployment exposed.
#[derive(Debug, Serialize, Deserialize)]
pub struct InvokeRequest {
    pub function: String,
    #[serde(default)]
    pub args: Vec<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ApiResponse {
    pub status: String,
    pub message: String,
    pub data: Option<serde_json::Value>,
}

pub struct RestApi {
    ledger: Arc<Ledger<MemoryStore>>,
}

impl RestApi {
    pub fn new(ledger: Arc<Ledger<MemoryStore>>) -> Self {
        RestApi { ledger }
    }

    pub fn routes(&self) -> impl Filter<Extract = impl warp::Reply, Error = warp::Rejection> + Clone {
        self.invoke().or(self.get_all_drugs()).or(self.get_drug())
    }

    /// POST /ledger/invoke — the generic operation endpoint.
    fn invoke(&self) -> impl Filter<Extract = impl warp::Reply, Error = warp::Rejection> + Clone {
        let ledger = Arc::clone(&self.ledger);

        warp::path!("ledger" / "invoke")
            .and(warp::post())
            .and(warp::body::json())
            .and_then(move |request: InvokeRequest| {
                let ledger = Arc::clone(&ledger);
                async move {
                    Ok::<Json, Infallible>(invoke_reply(&ledger, &request.function, &request.args))
                }
            })
    }

    /// GET /ledger/drugs — convenience route for queryAllDrugs.
    fn get_all_drugs(&self) -> impl Filter<Extract = impl warp::Reply, Error = warp::Rejection> + Clone {
        let ledger = Arc::clone(&self.ledger);

        warp::path!("ledger" / "drugs")
            .and(warp::get())
            .map(move || invoke_reply(&ledger, "queryAllDrugs", &[]))
    }

    /// GET /ledger/drug?key=K — convenience route for queryDrug.
    fn get_drug(&self) -> impl Filter<Extract = impl warp::Reply, Error = warp::Rejection> + Clone {
        let ledger = Arc::clone(&self.ledger);

        warp::path!("ledger" / "drug")
            .and(warp::get())
            .and(warp::query::<HashMap<String, String>>())
            .map(move |params: HashMap<String, String>| match params.get("key") {
                Some(key) => invoke_reply(&ledger, "queryDrug", std::slice::from_ref(key)),
                None => warp::reply::json(&ApiResponse {
                    status: "error".to_string(),
                    message: "Missing required query parameter: key".to_string(),
                    data: None,
                }),
            })
    }
}

fn invoke_reply(ledger: &Ledger<MemoryStore>, function: &str, args: &[String]) -> Json {
    match ledger.invoke(function, args) {
        Ok(payload) => {
            let data = if payload.is_empty() {
                None
            } else {
                // Payloads are the storage encoding; embed them as parsed
                // JSON when possible so clients get structure, not a string.
                match serde_json::from_slice(&payload) {
                    Ok(value) => Some(value),
                    Err(_) => Some(serde_json::Value::String(
                        String::from_utf8_lossy(&payload).into_owned(),
                    )),
                }
            };

            warp::reply::json(&ApiResponse {
                status: "success".to_string(),
                message: format!("{} completed", function),
                data,
            })
        }
        Err(err) => warp::reply::json(&ApiResponse {
            status: "error".to_string(),
            message: err.to_string(),
            data: None,
        }),
    }
}
