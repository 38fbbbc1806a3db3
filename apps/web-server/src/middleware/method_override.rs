//! Method override middleware - lets HTML forms reach PATCH, PUT and DELETE routes.
//!
//! Browsers only submit GET and POST, so forms post to `...?_method=delete`
//! and this middleware swaps the method before routing.

use actix_web::{
    Error,
    dev::{Service, ServiceRequest, ServiceResponse, Transform, forward_ready},
    http::Method,
};
use std::future::{Ready, ready};

use sample_shared::Verb;

/// Query parameter naming the intended method.
pub static METHOD_PARAM: &str = "_method";

pub struct MethodOverride;

impl<S, B> Transform<S, ServiceRequest> for MethodOverride
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Transform = MethodOverrideService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(MethodOverrideService { service }))
    }
}

pub struct MethodOverrideService<S> {
    service: S,
}

impl<S, B> Service<ServiceRequest> for MethodOverrideService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = S::Future;

    forward_ready!(service);

    fn call(&self, mut req: ServiceRequest) -> Self::Future {
        if req.method() == Method::POST {
            if let Some(method) = overridden_method(req.query_string()) {
                tracing::debug!(method = %method, path = %req.path(), "Overriding POST");
                req.head_mut().method = method;
            }
        }

        self.service.call(req)
    }
}

/// Only PATCH, PUT and DELETE may be tunnelled through POST.
fn overridden_method(query: &str) -> Option<Method> {
    let value = query
        .split('&')
        .filter_map(|pair| pair.split_once('='))
        .find(|(key, _)| *key == METHOD_PARAM)
        .map(|(_, value)| value)?;

    match Verb::parse(value)? {
        Verb::Patch => Some(Method::PATCH),
        Verb::Put => Some(Method::PUT),
        Verb::Delete => Some(Method::DELETE),
        Verb::Get | Verb::Post => None,
    }
}
