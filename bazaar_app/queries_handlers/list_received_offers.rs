use async_trait::async_trait;
use std::sync::Arc;

use bazaar_types::errors::MarketError;

use crate::{
    config::Config,
    cqrs::{Query, QueryHandler, queries::ListReceivedOffers},
    uow::UnitOfWork,
};

pub struct ListReceivedOffersHandler {}

impl ListReceivedOffersHandler {
    pub fn new() -> Self {
        Self {}
    }
}

#[async_trait]
impl QueryHandler<ListReceivedOffers> for ListReceivedOffersHandler {
    async fn handle(
        &self,
        query: ListReceivedOffers,
        uow: &Box<dyn UnitOfWork<'_> + '_>,
        _config: &Arc<Config>,
    ) -> Result<<ListReceivedOffers as Query>::Output, MarketError> {
        let user = uow.users().get_by_username(&query.username).await?;
        uow.offers().list_received_by_seller(user.id).await
    }
}
