// emsx/src/middleware/page_guard.rs
use actix_session::SessionExt;
use actix_web::{
    dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform},
    Error, HttpMessage,
};
use futures_util::future::LocalBoxFuture;
use std::rc::Rc;
use tracing::{info, warn};

use crate::error::EmsxError;
use crate::utils::{
    auth::user_from_session,
    role_config::{can_access_page, Page},
    structs::PageGuard,
};

impl<S, B> Transform<S, ServiceRequest> for PageGuard
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Transform = PageGuardMiddleware<S>;
    type InitError = ();
    type Future = LocalBoxFuture<'static, Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        let page = self.page;
        Box::pin(async move {
            Ok(PageGuardMiddleware {
                service: Rc::new(service),
                page,
            })
        })
    }
}

pub struct PageGuardMiddleware<S> {
    service: Rc<S>,
    page: Page,
}

impl<S, B> Service<ServiceRequest> for PageGuardMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let svc = Rc::clone(&self.service);
        let page = self.page;

        Box::pin(async move {
            let uri = req.uri().to_string();

            let Some(user) = user_from_session(&req.get_session()) else {
                warn!("🔐 No active role for request: {}", uri);
                return Err(EmsxError::Unauthorized.into());
            };

            if can_access_page(user.role, page) {
                info!("✅ Page {} granted to {} ({}) for {}", page, user.email, user.role, uri);
                req.extensions_mut().insert(user);
                svc.call(req).await
            } else {
                warn!("🚫 Page {} denied to {} ({}) for {}", page, user.email, user.role, uri);
                Err(EmsxError::Forbidden(format!("role {} cannot open {}", user.role, page)).into())
            }
        })
    }
}
