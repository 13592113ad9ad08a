use std::{
    collections::HashMap, future::Future, marker::PhantomData, pin::Pin,
};

use serde::{Deserialize, Serialize, de::DeserializeOwned};
use tracing::debug;

/// Name of the transfer invocation issued by the coordinator.
pub const UPLOAD_COMMAND: &str = "upload";

/// Argument payload of the `upload` command: the dropped file's path.
#[derive(Debug, Serialize, Deserialize)]
pub struct UploadRequest {
    pub file: String,
}

type BoxFuture<T> = Pin<Box<dyn Future<Output = T> + Send>>;

const CATASTROPHIC_ERROR: &str = "{\"result\": null, \"error\": \"CATASTROPHIC_ERROR: Failed to serialize response\", \"is_success\": false}";
const NOT_FOUND: &str = "{\"result\": null, \"error\": \"NOT_FOUND: Unknown command\", \"is_success\": false}";

/// Commands registered by name, invoked with JSON-encoded arguments.
///
/// Handlers are asynchronous: the caller awaits a serialized
/// [`Response`] envelope carrying either the handler's result or its
/// error message.
pub struct Router {
    routes: HashMap<String, Box<dyn Handler + Send + Sync>>,
}

impl Router {
    pub fn new() -> Self {
        Router {
            routes: HashMap::new(),
        }
    }

    pub fn add<Marker: 'static + Send + Sync>(
        &mut self,
        name: &str,
        function: impl HandlerFunction<Marker>,
    ) {
        self.routes.insert(
            name.to_owned(),
            Box::new(FunctionHandler {
                function,
                marker: PhantomData,
            }),
        );
    }

    pub async fn call(&self, name: &str, args: Vec<String>) -> String {
        debug!(command = name, "invoking");
        match self.routes.get(name) {
            Some(handler) => handler.call(args).await,
            None => NOT_FOUND.into(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Response<T> {
    pub result: Option<T>,
    pub error: Option<String>,
    pub is_success: bool,
}

impl<T> Response<T> {
    pub fn success(result: T) -> Self {
        Response {
            result: Some(result),
            error: None,
            is_success: true,
        }
    }

    pub fn error(error: String) -> Self {
        Response {
            result: None,
            error: Some(error),
            is_success: false,
        }
    }
}

pub trait Handler {
    fn call(&self, args: Vec<String>) -> BoxFuture<String>;
}

pub trait HandlerFunction<Marker>: Send + Sync + 'static {
    fn call(&self, args: Vec<String>) -> BoxFuture<String>;
}

impl<F, T0, Fut, R> HandlerFunction<fn(T0) -> Fut> for F
where
    F: Fn(T0) -> Fut + Send + Sync + 'static,
    T0: DeserializeOwned + Send + 'static,
    Fut: Future<Output = anyhow::Result<R>> + Send + 'static,
    R: Serialize + Send + 'static,
{
    fn call(&self, args: Vec<String>) -> BoxFuture<String> {
        let mut args = args.into_iter();
        let arg = serde_json::from_str::<T0>(
            &args.next().unwrap_or_else(|| "{}".to_string()),
        );
        match arg {
            Ok(arg) => {
                let future = (self)(arg);
                Box::pin(async move {
                    let response = match future.await {
                        Ok(result) => Response::success(result),
                        Err(e) => Response::<R>::error(e.to_string()),
                    };
                    serde_json::to_string(&response)
                        .unwrap_or_else(|_| CATASTROPHIC_ERROR.into())
                })
            }
            Err(_) => Box::pin(async {
                serde_json::to_string(&Response::<R>::error(
                    "Failed to deserialize arguments".to_string(),
                ))
                .unwrap_or_else(|_| CATASTROPHIC_ERROR.into())
            }),
        }
    }
}

struct FunctionHandler<F, Marker> {
    function: F,
    marker: PhantomData<Marker>,
}

impl<F: HandlerFunction<Marker>, Marker> Handler
    for FunctionHandler<F, Marker>
{
    fn call(&self, args: Vec<String>) -> BoxFuture<String> {
        self.function.call(args)
    }
}
