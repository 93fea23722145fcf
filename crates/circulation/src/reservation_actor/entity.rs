//! [`ActorEntity`] implementation for [`Reservation`].

use super::actions::ReservationAction;
use crate::directory::{verify_references, SharedDirectory};
use crate::engine::{self, LifecycleError};
use crate::model::{NewReservation, Reservation, ReservationId, ReservationQuery};
use actor_framework::ActorEntity;
use async_trait::async_trait;
use chrono::Datelike;

#[async_trait]
impl ActorEntity for Reservation {
    type Id = ReservationId;
    type Create = NewReservation;
    type Action = ReservationAction;
    type Query = ReservationQuery;
    type Scope = i32;
    type Context = SharedDirectory;
    type Error = LifecycleError;

    fn sequence_scope(params: &NewReservation) -> i32 {
        params.reservation_date.year()
    }

    fn from_create_params(
        id: ReservationId,
        sequence: u32,
        params: NewReservation,
    ) -> Result<Self, LifecycleError> {
        engine::create_reservation(id, sequence, params)
    }

    async fn on_create(&mut self, directory: &SharedDirectory) -> Result<(), LifecycleError> {
        verify_references(directory.as_ref(), &self.member_id, &self.book_id).await
    }

    async fn handle_action(
        &mut self,
        action: ReservationAction,
        _directory: &SharedDirectory,
    ) -> Result<(), LifecycleError> {
        *self = match action {
            ReservationAction::Fulfill => engine::fulfill_reservation(self)?,
            ReservationAction::Cancel => engine::cancel_reservation(self)?,
        };
        Ok(())
    }

    fn matches(&self, query: &ReservationQuery) -> bool {
        query.matches(self)
    }
}
