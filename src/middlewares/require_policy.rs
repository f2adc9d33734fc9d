/*!
 * 端点授权策略中间件
 *
 * 必须在 RequireJWT 之后使用。按 (资源, 动作) 查策略表，只检查认证与角色；
 * 所有权与范围需要具体实例，由业务层调用同一个判定函数完成。
 *
 * ```rust,ignore
 * web::resource("/{id}/")
 *     .route(
 *         web::put()
 *             .to(update_exam)
 *             .wrap(RequirePolicy::new(ResourceKind::Exam, Action::Update)),
 *     )
 * ```
 */

use actix_service::{Service, Transform};
use actix_web::{
    Error, HttpMessage,
    body::EitherBody,
    dev::{ServiceRequest, ServiceResponse},
};
use futures_util::future::{LocalBoxFuture, Ready, ready};
use std::rc::Rc;

use crate::access::{Action, Decision, Principal, ResourceKind, authorize};

#[derive(Clone, Copy)]
pub struct RequirePolicy {
    kind: ResourceKind,
    action: Action,
}

impl RequirePolicy {
    pub fn new(kind: ResourceKind, action: Action) -> Self {
        Self { kind, action }
    }
}

impl<S, B> Transform<S, ServiceRequest> for RequirePolicy
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = RequirePolicyMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RequirePolicyMiddleware {
            service: Rc::new(service),
            kind: self.kind,
            action: self.action,
        }))
    }
}

pub struct RequirePolicyMiddleware<S> {
    service: Rc<S>,
    kind: ResourceKind,
    action: Action,
}

impl<S, B> Service<ServiceRequest> for RequirePolicyMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(
        &self,
        ctx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<Result<(), Self::Error>> {
        self.service.poll_ready(ctx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let srv = self.service.clone();
        let kind = self.kind;
        let action = self.action;

        Box::pin(async move {
            let principal = req.extensions().get::<Principal>().cloned();

            match authorize(action, kind, None, principal.as_ref()) {
                Decision::Allow => {
                    let res = srv.call(req).await?.map_into_left_body();
                    Ok(res)
                }
                Decision::Deny(reason) => {
                    Ok(req.into_response(reason.into_response().map_into_right_body()))
                }
            }
        })
    }
}
