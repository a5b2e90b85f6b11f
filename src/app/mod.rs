//! Application services over a shared storage backend.

use crate::storage::Storage;
use std::sync::Arc;

pub mod catalog_service;
pub mod film_service;
pub mod friendship_graph;
pub mod like_ledger;
pub mod social_query;
pub mod user_service;

pub use catalog_service::CatalogService;
pub use film_service::FilmService;
pub use friendship_graph::FriendshipGraph;
pub use like_ledger::LikeLedger;
pub use social_query::SocialQueryService;
pub use user_service::UserService;

/// Every service, wired to the same storage. Cheap to clone.
#[derive(Clone)]
pub struct Services {
    pub storage: Arc<dyn Storage>,
    pub catalog: CatalogService,
    pub films: FilmService,
    pub users: UserService,
    pub likes: LikeLedger,
    pub friends: FriendshipGraph,
    pub social: SocialQueryService,
}

impl Services {
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        let catalog = CatalogService::new(storage.clone());
        let films = FilmService::new(storage.clone(), catalog.clone());
        let users = UserService::new(storage.clone());
        let likes = LikeLedger::new(storage.clone());
        let friends = FriendshipGraph::new(storage.clone(), users.clone());
        let social = SocialQueryService::new(storage.clone(), users.clone());
        Self {
            storage,
            catalog,
            films,
            users,
            likes,
            friends,
            social,
        }
    }
}
