//! Stock change submissions

use serde::{Deserialize, Serialize};
use validator::Validate;

use super::{MovementType, PendingPartner};
use crate::codec::compose_note_with_partner;
use crate::error::{ClientError, ClientResult};
use crate::types::EntityId;
use crate::validation::validate_partner_name;

/// Direction chosen in the stock dialog
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum StockDirection {
    #[default]
    Increase,
    Decrease,
}

impl StockDirection {
    /// Increases are recorded as purchases, decreases as sales
    pub fn movement_type(&self) -> MovementType {
        match self {
            StockDirection::Increase => MovementType::Purchase,
            StockDirection::Decrease => MovementType::Sale,
        }
    }
}

/// What the user typed into the stock dialog
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct StockChangeForm {
    pub product_id: EntityId,
    #[serde(rename = "type", default)]
    pub direction: StockDirection,
    #[validate(range(min = 1, message = "Amount must be at least 1"))]
    pub amount: i64,
    #[serde(default)]
    #[validate(length(max = 120, message = "Partner name is too long"))]
    pub partner: String,
    #[serde(default)]
    pub note: String,
}

/// Body of `POST /products/{id}/stock`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct StockChangeRequest {
    pub amount: i64,
    #[serde(rename = "type")]
    pub direction: StockDirection,
    pub note: String,
}

/// A validated stock change ready to send, plus the pending entry to record
/// once the request is accepted
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct StockSubmission {
    pub product_id: EntityId,
    pub request: StockChangeRequest,
    pub pending: Option<PendingPartner>,
}

impl StockChangeForm {
    pub fn into_submission(self) -> ClientResult<StockSubmission> {
        self.validate()
            .map_err(|e| ClientError::Validation(e.to_string()))?;
        validate_partner_name(&self.partner)
            .map_err(|msg| ClientError::Validation(msg.to_string()))?;

        let note = compose_note_with_partner(&self.partner, &self.note);
        let partner = self.partner.trim();
        let pending = (!partner.is_empty()).then(|| PendingPartner {
            product_id: self.product_id,
            movement_type: self.direction.movement_type(),
            quantity: self.amount,
            partner: partner.to_string(),
        });

        Ok(StockSubmission {
            product_id: self.product_id,
            request: StockChangeRequest {
                amount: self.amount,
                direction: self.direction,
                note,
            },
            pending,
        })
    }
}

/// Stock level after applying a change, used when the backend only accepts
/// a direct product update
pub fn projected_stock(current: i64, direction: StockDirection, amount: i64) -> i64 {
    match direction {
        StockDirection::Increase => current.saturating_add(amount),
        StockDirection::Decrease => current.saturating_sub(amount),
    }
}
