use crate::cache::{ObjectCache, create_object_cache};
use crate::config::{AppConfig, SchoolConfig, SeedTeacher};
use crate::models::users::entities::NewUser;
use crate::services::{Notifier, StorageNotifier};
use crate::storage::Storage;
use crate::utils::password::{generate_password, hash_password};
use std::sync::Arc;
use tracing::{debug, info, warn};

pub struct StartupContext {
    pub storage: Arc<dyn Storage>,
    pub cache: Arc<dyn ObjectCache>,
    pub notifier: Arc<dyn Notifier>,
}

/// 按配置创建全部班级（年级 × 字母）
async fn seed_classes(storage: &Arc<dyn Storage>, school: &SchoolConfig) {
    let mut created = 0usize;
    for number in &school.class_numbers {
        for letter in &school.class_letters {
            match storage.ensure_class(*number, letter).await {
                Ok(_) => created += 1,
                Err(e) => warn!("Failed to seed class {}{}: {}", number, letter, e),
            }
        }
    }
    debug!("Seeded {} class(es)", created);
}

async fn seed_subjects(storage: &Arc<dyn Storage>, school: &SchoolConfig) {
    for title in &school.subjects {
        if let Err(e) = storage.ensure_subject(title).await {
            warn!("Failed to seed subject {}: {}", title, e);
        }
    }
}

/// 初始化配置中的教师账号，已存在的用户名跳过
async fn seed_teacher(storage: &Arc<dyn Storage>, seed: &SeedTeacher) {
    match storage.get_user_by_username(&seed.username).await {
        Ok(Some(_)) => {
            debug!("Teacher {} already exists, skipping seed", seed.username);
            return;
        }
        Ok(None) => {}
        Err(e) => {
            warn!("Failed to look up teacher {}: {}, skipping seed", seed.username, e);
            return;
        }
    }

    let subject = match storage.ensure_subject(&seed.subject).await {
        Ok(subject) => subject,
        Err(e) => {
            warn!(
                "Failed to prepare subject {} for teacher {}: {}",
                seed.subject, seed.username, e
            );
            return;
        }
    };

    // 密码为空时生成随机密码
    let password = if seed.password.is_empty() {
        let pwd = generate_password(16);
        warn!("==========================================================");
        warn!("  TEACHER PASSWORD NOT SET - USING GENERATED PASSWORD");
        warn!("  Generated password for {}: {}", seed.username, pwd);
        warn!("  Please save this password or set it in config.toml");
        warn!("==========================================================");
        pwd
    } else {
        seed.password.clone()
    };

    let password_hash = match hash_password(&password) {
        Ok(hash) => hash,
        Err(e) => {
            warn!("Failed to hash password for {}: {}, skipping seed", seed.username, e);
            return;
        }
    };

    let new_user = NewUser {
        username: seed.username.clone(),
        email: seed.email.clone(),
        password_hash,
        first_name: seed.first_name.clone(),
        last_name: seed.last_name.clone(),
    };

    match storage.create_teacher_account(new_user, subject.id).await {
        Ok(teacher) => info!(
            "Teacher account created (user ID: {}, username: {}, subject: {})",
            teacher.user.id, teacher.user.username, subject.title
        ),
        Err(e) => warn!("Failed to create teacher {}: {}", seed.username, e),
    }
}

/// 准备服务器启动的上下文
/// 包括存储、基础数据、缓存与通知
pub async fn prepare_server_startup() -> StartupContext {
    rustls::crypto::ring::default_provider()
        .install_default()
        .expect("Failed to install rustls crypto provider");

    let storage = crate::storage::create_storage()
        .await
        .expect("Failed to create storage backend");
    warn!("Storage backend initialized and migrations completed");

    let school = &AppConfig::get().school;
    seed_classes(&storage, school).await;
    seed_subjects(&storage, school).await;
    for teacher in &school.teachers {
        seed_teacher(&storage, teacher).await;
    }

    let cache = create_object_cache();
    warn!("Cache backend initialized");

    let notifier: Arc<dyn Notifier> = Arc::new(StorageNotifier::new(storage.clone()));

    StartupContext {
        storage,
        cache,
        notifier,
    }
}
