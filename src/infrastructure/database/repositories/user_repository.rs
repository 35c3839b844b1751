//! SeaORM implementation of UserRepository

use async_trait::async_trait;
use log::debug;
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, QueryOrder, Set};

use super::{db_err, insert_err};
use crate::domain::{DomainResult, User, UserRepository};
use crate::infrastructure::database::entities::user;

pub struct SeaOrmUserRepository {
    db: DatabaseConnection,
}

impl SeaOrmUserRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn model_to_domain(m: user::Model) -> User {
    User {
        email: m.email,
        first_name: m.first_name,
        last_name: m.last_name,
        password_hash: m.password_hash,
    }
}

#[async_trait]
impl UserRepository for SeaOrmUserRepository {
    async fn create(&self, u: User) -> DomainResult<()> {
        debug!("Saving user: {}", u.email);

        let key = u.email.clone();
        let model = user::ActiveModel {
            email: Set(u.email),
            first_name: Set(u.first_name),
            last_name: Set(u.last_name),
            password_hash: Set(u.password_hash),
        };
        model
            .insert(&self.db)
            .await
            .map_err(|e| insert_err("User", &key, e))?;
        Ok(())
    }

    async fn find_by_email(&self, email: &str) -> DomainResult<Option<User>> {
        let model = user::Entity::find_by_id(email.to_string())
            .one(&self.db)
            .await
            .map_err(db_err)?;
        Ok(model.map(model_to_domain))
    }

    async fn find_all(&self) -> DomainResult<Vec<User>> {
        let models = user::Entity::find()
            .order_by_asc(user::Column::Email)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        Ok(models.into_iter().map(model_to_domain).collect())
    }
}
