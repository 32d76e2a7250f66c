//! Lookup (reference) tables: equipment types, statuses, intervention outcomes

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

/// Category of a piece of equipment (e.g. Desktop PC, Network Printer)
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct EquipmentType {
    pub id: i32,
    pub description: String,
}

/// Operational status of equipment (Working, Under Repair, Obsolete).
/// Rows are seeded by migration; ids are fixed (see `rules::EquipmentStatusId`).
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct EquipmentStatus {
    pub id: i32,
    pub description: String,
}

/// Result of a maintenance intervention (Resolved, Monitoring, Pending).
/// Rows are seeded by migration; ids are fixed (see `rules::Outcome`).
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct InterventionOutcome {
    pub id: i32,
    pub description: String,
}
