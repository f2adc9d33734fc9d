pub mod auth;

pub mod profiles;

pub mod classes;

pub mod subjects;

pub mod materials;

pub mod grades;

pub mod homeworks;

pub mod exams;

pub mod news;

pub mod notifications;

pub use auth::configure_auth_routes;
pub use classes::configure_classes_routes;
pub use exams::configure_exams_routes;
pub use homeworks::configure_homeworks_routes;
pub use materials::configure_materials_routes;
pub use news::configure_news_routes;
pub use notifications::configure_notifications_routes;
pub use profiles::configure_profile_routes;
pub use subjects::configure_subjects_routes;

/// 注册全部路由
pub fn configure_routes(cfg: &mut actix_web::web::ServiceConfig) {
    cfg.configure(configure_auth_routes)
        .configure(configure_profile_routes)
        .configure(configure_classes_routes)
        .configure(configure_subjects_routes)
        .configure(configure_materials_routes)
        .configure(configure_homeworks_routes)
        .configure(configure_exams_routes)
        .configure(configure_news_routes)
        .configure(configure_notifications_routes);
}
