//! Role-based access policy
//!
//! A pure predicate layer over the closed role set. Operations are gated by
//! a data-driven capability table instead of role-id comparisons scattered
//! through handlers; storekeeper fine-grained flags are checked on top of
//! the coarse role where relevant.

use shared::Role;

use crate::error::{AppError, AppResult};
use crate::middleware::AuthUser;

/// Every operation the API exposes that needs a role check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    CreateSolicitud,
    ApproveSolicitud,
    RejectSolicitud,
    DeliverSolicitud,
    CancelSolicitud,
    ListAllSolicitudes,
    ManageCatalog,
    AdjustStock,
    ViewMovements,
    RegisterReturn,
    ListAllAdeudos,
    UseChat,
}

/// Capability table: which roles may invoke which operation. Ownership and
/// state guards are enforced separately by the services.
const CAPABILITIES: &[(Operation, &[Role])] = &[
    (Operation::CreateSolicitud, &[Role::Student, Role::Teacher]),
    (Operation::ApproveSolicitud, &[Role::Teacher, Role::Admin]),
    (Operation::RejectSolicitud, &[Role::Teacher, Role::Admin]),
    (Operation::DeliverSolicitud, &[Role::Storekeeper]),
    (
        Operation::CancelSolicitud,
        &[Role::Student, Role::Teacher, Role::Storekeeper],
    ),
    (
        Operation::ListAllSolicitudes,
        &[Role::Storekeeper, Role::Admin],
    ),
    (Operation::ManageCatalog, &[Role::Storekeeper, Role::Admin]),
    (Operation::AdjustStock, &[Role::Storekeeper, Role::Admin]),
    (Operation::ViewMovements, &[Role::Storekeeper, Role::Admin]),
    (Operation::RegisterReturn, &[Role::Storekeeper, Role::Admin]),
    (Operation::ListAllAdeudos, &[Role::Storekeeper, Role::Admin]),
    (Operation::UseChat, &[Role::Storekeeper, Role::Admin]),
];

/// Whether `role` may invoke `operation`
pub fn allows(role: Role, operation: Operation) -> bool {
    CAPABILITIES
        .iter()
        .find(|(op, _)| *op == operation)
        .map(|(_, roles)| roles.contains(&role))
        .unwrap_or(false)
}

/// Operations that additionally require a storekeeper flag
fn required_flag(operation: Operation) -> Option<StorekeeperFlag> {
    match operation {
        Operation::DeliverSolicitud | Operation::AdjustStock | Operation::CancelSolicitud => {
            Some(StorekeeperFlag::Stock)
        }
        Operation::UseChat => Some(StorekeeperFlag::Chat),
        _ => None,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum StorekeeperFlag {
    Chat,
    Stock,
}

/// Full check for an authenticated caller: coarse role first, then the
/// fine-grained storekeeper flag where the operation demands one.
pub fn check(user: &AuthUser, operation: Operation) -> AppResult<()> {
    if !allows(user.role, operation) {
        return Err(AppError::Forbidden(format!(
            "role {} may not perform this operation",
            user.role.as_str()
        )));
    }

    if user.role == Role::Storekeeper {
        match required_flag(operation) {
            Some(StorekeeperFlag::Stock) if !user.stock_access => {
                return Err(AppError::Forbidden(
                    "storekeeper account lacks stock access".to_string(),
                ));
            }
            Some(StorekeeperFlag::Chat) if !user.chat_access => {
                return Err(AppError::Forbidden(
                    "storekeeper account lacks chat access".to_string(),
                ));
            }
            _ => {}
        }
    }

    Ok(())
}
