use async_trait::async_trait;
use std::sync::Arc;

use bazaar_types::errors::MarketError;

use crate::{
    config::Config,
    cqrs::{Query, QueryHandler, queries::ListSentOffers},
    uow::UnitOfWork,
};

pub struct ListSentOffersHandler {}

impl ListSentOffersHandler {
    pub fn new() -> Self {
        Self {}
    }
}

#[async_trait]
impl QueryHandler<ListSentOffers> for ListSentOffersHandler {
    async fn handle(
        &self,
        query: ListSentOffers,
        uow: &Box<dyn UnitOfWork<'_> + '_>,
        _config: &Arc<Config>,
    ) -> Result<<ListSentOffers as Query>::Output, MarketError> {
        let user = uow.users().get_by_username(&query.username).await?;
        uow.offers().list_by_buyer(user.id).await
    }
}
