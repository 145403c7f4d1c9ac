use actix_web::HttpResponse;

/// Outcome of one stage of a handler chain.
#[must_use]
pub enum Flow<T> {
    Continue(T),
    Halt(HttpResponse),
}

/// Unwraps a `Continue`, or returns the `Halt` response from the handler.
macro_rules! proceed {
    ($flow:expr) => {
        match $flow {
            $crate::api::middlewares::flow::Flow::Continue(value) => value,
            $crate::api::middlewares::flow::Flow::Halt(response) => return Ok(response),
        }
    };
}

pub(crate) use proceed;
