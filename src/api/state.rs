//! Application state for shared services

use std::sync::Arc;

use crate::domain::account::AccountRepository;
use crate::domain::ledger::Amount;
use crate::domain::storage::Storage;
use crate::domain::{ApiKeyRecord, BlogPost, DomainError, UserAccount};
use crate::infrastructure::account::AccountService;
use crate::infrastructure::auth::JwtGenerator;
use crate::infrastructure::services::{
    BlogPostService, CreateBlogPostRequest, UpdateBlogPostRequest,
};

/// Application state containing shared services using dynamic dispatch
#[derive(Clone)]
pub struct AppState {
    pub account_service: Arc<dyn AccountServiceTrait>,
    pub blog_post_service: Arc<dyn BlogPostServiceTrait>,
    pub jwt_service: Arc<dyn JwtGenerator>,
}

impl AppState {
    pub fn new(
        account_service: Arc<dyn AccountServiceTrait>,
        blog_post_service: Arc<dyn BlogPostServiceTrait>,
        jwt_service: Arc<dyn JwtGenerator>,
    ) -> Self {
        Self {
            account_service,
            blog_post_service,
            jwt_service,
        }
    }
}

/// Account operations reachable from handlers
#[async_trait::async_trait]
pub trait AccountServiceTrait: Send + Sync {
    async fn register(&self, id: &str, email: &str) -> Result<UserAccount, DomainError>;
    async fn get(&self, id: &str) -> Result<Option<UserAccount>, DomainError>;
    async fn list(&self) -> Result<Vec<UserAccount>, DomainError>;
    async fn count(&self) -> Result<usize, DomainError>;
    async fn delete(&self, id: &str) -> Result<bool, DomainError>;
    async fn create_api_key(&self, id: &str) -> Result<(UserAccount, ApiKeyRecord), DomainError>;
    async fn delete_api_key(&self, id: &str, key: &str) -> Result<UserAccount, DomainError>;
    async fn set_balance(
        &self,
        id: &str,
        key: &str,
        balance: Amount,
    ) -> Result<UserAccount, DomainError>;
    async fn transfer(
        &self,
        id: &str,
        from: &str,
        to: &str,
        amount: Amount,
    ) -> Result<UserAccount, DomainError>;
}

/// Blog post operations reachable from handlers
#[async_trait::async_trait]
pub trait BlogPostServiceTrait: Send + Sync {
    async fn get(&self, id: &str) -> Result<Option<BlogPost>, DomainError>;
    async fn list(&self) -> Result<Vec<BlogPost>, DomainError>;
    async fn count(&self) -> Result<usize, DomainError>;
    async fn create(&self, request: CreateBlogPostRequest) -> Result<BlogPost, DomainError>;
    async fn update(
        &self,
        id: &str,
        request: UpdateBlogPostRequest,
    ) -> Result<BlogPost, DomainError>;
    async fn delete(&self, id: &str) -> Result<bool, DomainError>;
}

#[async_trait::async_trait]
impl<R: AccountRepository + ?Sized + 'static> AccountServiceTrait for AccountService<R> {
    async fn register(&self, id: &str, email: &str) -> Result<UserAccount, DomainError> {
        AccountService::register(self, id, email).await
    }

    async fn get(&self, id: &str) -> Result<Option<UserAccount>, DomainError> {
        AccountService::get(self, id).await
    }

    async fn list(&self) -> Result<Vec<UserAccount>, DomainError> {
        AccountService::list(self).await
    }

    async fn count(&self) -> Result<usize, DomainError> {
        AccountService::count(self).await
    }

    async fn delete(&self, id: &str) -> Result<bool, DomainError> {
        AccountService::delete(self, id).await
    }

    async fn create_api_key(&self, id: &str) -> Result<(UserAccount, ApiKeyRecord), DomainError> {
        AccountService::create_api_key(self, id).await
    }

    async fn delete_api_key(&self, id: &str, key: &str) -> Result<UserAccount, DomainError> {
        AccountService::delete_api_key(self, id, key).await
    }

    async fn set_balance(
        &self,
        id: &str,
        key: &str,
        balance: Amount,
    ) -> Result<UserAccount, DomainError> {
        AccountService::set_balance(self, id, key, balance).await
    }

    async fn transfer(
        &self,
        id: &str,
        from: &str,
        to: &str,
        amount: Amount,
    ) -> Result<UserAccount, DomainError> {
        AccountService::transfer(self, id, from, to, amount).await
    }
}

#[async_trait::async_trait]
impl<S: Storage<BlogPost> + ?Sized + 'static> BlogPostServiceTrait for BlogPostService<S> {
    async fn get(&self, id: &str) -> Result<Option<BlogPost>, DomainError> {
        BlogPostService::get(self, id).await
    }

    async fn list(&self) -> Result<Vec<BlogPost>, DomainError> {
        BlogPostService::list(self).await
    }

    async fn count(&self) -> Result<usize, DomainError> {
        BlogPostService::count(self).await
    }

    async fn create(&self, request: CreateBlogPostRequest) -> Result<BlogPost, DomainError> {
        BlogPostService::create(self, request).await
    }

    async fn update(
        &self,
        id: &str,
        request: UpdateBlogPostRequest,
    ) -> Result<BlogPost, DomainError> {
        BlogPostService::update(self, id, request).await
    }

    async fn delete(&self, id: &str) -> Result<bool, DomainError> {
        BlogPostService::delete(self, id).await
    }
}
