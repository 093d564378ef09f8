use axum::extract::{FromRequest, FromRequestParts, Request};
use garde::Validate;
use http::request::Parts;
use std::fmt::{Display, Formatter};
use std::ops::{Deref, DerefMut};

use crate::contract::Normalize;
use crate::error::ApiError;

/// Extractor wrapper normalizing and then validating extracted value
#[derive(Debug, Clone, Copy, Default)]
pub struct Garde<E>(pub E);

impl<E> Deref for Garde<E> {
    type Target = E;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<E> DerefMut for Garde<E> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

impl<E: Display> Display for Garde<E> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

impl<E> Garde<E> {
    pub fn into_inner(self) -> E {
        self.0
    }
}

fn check<Extractor, T>(mut inner: Extractor) -> Result<Garde<Extractor>, ApiError>
where
    T: Validate<Context = ()> + Normalize,
    Extractor: DerefMut<Target = T>,
{
    inner.deref_mut().normalize();
    inner.deref().validate()?;
    Ok(Garde(inner))
}

impl<S, Extractor, T> FromRequest<S> for Garde<Extractor>
where
    S: Send + Sync,
    T: Validate<Context = ()> + Normalize,
    Extractor: DerefMut<Target = T> + FromRequest<S>,
    <Extractor as FromRequest<S>>::Rejection: Into<ApiError>,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let inner = Extractor::from_request(req, state)
            .await
            .map_err(Into::into)?;
        check(inner)
    }
}

impl<S, Extractor, T> FromRequestParts<S> for Garde<Extractor>
where
    S: Send + Sync,
    T: Validate<Context = ()> + Normalize,
    Extractor: DerefMut<Target = T> + FromRequestParts<S>,
    <Extractor as FromRequestParts<S>>::Rejection: Into<ApiError>,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let inner = Extractor::from_request_parts(parts, state)
            .await
            .map_err(Into::into)?;
        check(inner)
    }
}
