//! Domain rules: status synchronization and administrator safety checks.
//!
//! These are pure functions so they can be validated without a database.
//! The repository layer is responsible for evaluating them atomically with
//! the mutation they guard (see `repository::users`).

use crate::error::{AppError, AppResult};
use crate::models::user::Role;

/// Intervention outcomes seeded by migration. The numeric identities are
/// part of the data contract and must not be reordered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum Outcome {
    Resolved = 1,
    Monitoring = 2,
    Pending = 3,
}

/// Equipment operational statuses seeded by migration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum EquipmentStatusId {
    Working = 1,
    UnderRepair = 2,
    Obsolete = 3,
}

/// Map an intervention outcome to the equipment status it implies.
///
/// - Resolved -> the equipment is back to Working.
/// - Pending or Monitoring -> the equipment stays Under Repair.
/// - Any other outcome id leaves the status untouched: future outcome kinds
///   must be mapped here explicitly, never guessed.
pub fn status_for_outcome(outcome_id: i32) -> Option<EquipmentStatusId> {
    match outcome_id {
        x if x == Outcome::Resolved as i32 => Some(EquipmentStatusId::Working),
        x if x == Outcome::Pending as i32 || x == Outcome::Monitoring as i32 => {
            Some(EquipmentStatusId::UnderRepair)
        }
        _ => None,
    }
}

/// Validate a role change against the pre-mutation administrator count.
///
/// Demotion guard: the last administrator cannot lose the admin role.
/// Promotion guard: a technician cannot be promoted through a role edit;
/// administrators are only created through the dedicated creation path.
pub fn validate_role_change(
    current_role: Role,
    requested_role: Role,
    admin_count: i64,
) -> AppResult<()> {
    if current_role == Role::Admin && requested_role != Role::Admin && admin_count <= 1 {
        return Err(AppError::InvariantViolation(
            "Cannot change role: this is the last administrator".to_string(),
        ));
    }

    if current_role == Role::Technician && requested_role == Role::Admin {
        return Err(AppError::InvariantViolation(
            "Promotion forbidden: a technician cannot be promoted to administrator".to_string(),
        ));
    }

    Ok(())
}

/// Validate a user deletion against the pre-mutation administrator count.
pub fn validate_deletion(target_role: Role, admin_count: i64) -> AppResult<()> {
    if target_role == Role::Admin && admin_count <= 1 {
        return Err(AppError::InvariantViolation(
            "Cannot delete user: this is the last administrator".to_string(),
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolved_maps_to_working() {
        assert_eq!(
            status_for_outcome(Outcome::Resolved as i32),
            Some(EquipmentStatusId::Working)
        );
    }

    #[test]
    fn pending_and_monitoring_map_to_under_repair() {
        assert_eq!(
            status_for_outcome(Outcome::Pending as i32),
            Some(EquipmentStatusId::UnderRepair)
        );
        assert_eq!(
            status_for_outcome(Outcome::Monitoring as i32),
            Some(EquipmentStatusId::UnderRepair)
        );
    }

    #[test]
    fn unknown_outcome_leaves_status_untouched() {
        assert_eq!(status_for_outcome(0), None);
        assert_eq!(status_for_outcome(4), None);
        assert_eq!(status_for_outcome(-1), None);
    }

    #[test]
    fn demoting_last_admin_is_rejected() {
        let err = validate_role_change(Role::Admin, Role::Technician, 1).unwrap_err();
        assert!(matches!(err, AppError::InvariantViolation(msg) if msg.contains("last administrator")));
    }

    #[test]
    fn demoting_admin_with_peers_is_allowed() {
        assert!(validate_role_change(Role::Admin, Role::Technician, 2).is_ok());
    }

    #[test]
    fn promoting_technician_is_always_rejected() {
        for count in [0, 1, 5, 100] {
            let err = validate_role_change(Role::Technician, Role::Admin, count).unwrap_err();
            assert!(matches!(err, AppError::InvariantViolation(msg) if msg.contains("Promotion forbidden")));
        }
    }

    #[test]
    fn identity_role_changes_pass() {
        assert!(validate_role_change(Role::Admin, Role::Admin, 1).is_ok());
        assert!(validate_role_change(Role::Technician, Role::Technician, 1).is_ok());
    }

    #[test]
    fn deleting_last_admin_is_rejected() {
        let err = validate_deletion(Role::Admin, 1).unwrap_err();
        assert!(matches!(err, AppError::InvariantViolation(msg) if msg.contains("last administrator")));
    }

    #[test]
    fn deleting_technician_is_always_allowed() {
        assert!(validate_deletion(Role::Technician, 1).is_ok());
        assert!(validate_deletion(Role::Admin, 2).is_ok());
    }
}
