//! Vote entity <-> model mapper

use bubble_core::{BubbleId, DomainError, Fingerprint, Vote, VoteValue};

use crate::models::VoteModel;

impl TryFrom<VoteModel> for Vote {
    type Error = DomainError;

    fn try_from(model: VoteModel) -> Result<Self, Self::Error> {
        let bubble_id = BubbleId::parse(&model.bubble_id)
            .map_err(|_| DomainError::Storage(format!("corrupt bubble id: {}", model.bubble_id)))?;
        let value = VoteValue::from_value(model.vote)
            .ok_or_else(|| DomainError::Storage(format!("corrupt vote value: {}", model.vote)))?;

        Ok(Vote::new(
            bubble_id,
            Fingerprint::from_raw(model.fingerprint),
            value,
        ))
    }
}
