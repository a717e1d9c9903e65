//! Solicitud lifecycle service
//!
//! Owns the request state machine: creation, approval, rejection,
//! cancellation, delivery, and janitor-driven expiry. Legal edges come from
//! `shared::EstadoSolicitud`; everything else here is guards and side
//! effects (ledger debits, adeudos, notifications).

use chrono::{DateTime, Datelike, Duration, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::middleware::AuthUser;
use crate::policy::{self, Operation};
use crate::services::adeudo::AdeudoService;
use crate::services::inventory::InventoryService;
use crate::services::material::require_positive;
use crate::services::notificacion::NotificacionService;
use shared::{
    validate_cantidad_entregada, EstadoSolicitud, MovimientoMotivo, NotificacionTipo, Role,
};

/// Solicitud lifecycle service
#[derive(Clone)]
pub struct SolicitudService {
    db: PgPool,
}

/// A solicitud row
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct SolicitudRow {
    pub id: Uuid,
    pub folio: String,
    pub solicitante_id: Uuid,
    pub solicitante_role: String,
    pub docente_id: Option<Uuid>,
    pub estado: String,
    pub fecha_recoleccion: NaiveDate,
    pub fecha_devolucion: NaiveDate,
    pub created_at: DateTime<Utc>,
}

/// A solicitud item row
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct ItemRow {
    pub id: Uuid,
    pub solicitud_id: Uuid,
    pub material_id: Uuid,
    pub cantidad_solicitada: Decimal,
    /// Starts equal to the requested quantity; the delivery step is the
    /// only reducer.
    pub cantidad_entregada: Decimal,
    pub tipo: String,
}

/// A solicitud with its items
#[derive(Debug, Clone, Serialize)]
pub struct SolicitudDetalle {
    #[serde(flatten)]
    pub solicitud: SolicitudRow,
    pub items: Vec<ItemRow>,
}

/// Input for creating a grouped request
#[derive(Debug, Deserialize)]
pub struct CreateSolicitudInput {
    /// Teacher designated to approve; required for student requests
    pub docente_id: Option<Uuid>,
    pub fecha_recoleccion: NaiveDate,
    pub fecha_devolucion: NaiveDate,
    pub items: Vec<NewItemInput>,
}

#[derive(Debug, Deserialize)]
pub struct NewItemInput {
    pub material_id: Uuid,
    pub cantidad: Decimal,
}

/// One delivered line, as sent by the storekeeper
#[derive(Debug, Clone, Deserialize)]
pub struct ItemEntrega {
    pub item_id: Uuid,
    pub cantidad_entregada: Decimal,
}

/// Body of the deliver endpoint
#[derive(Debug, Deserialize)]
pub struct EntregaInput {
    pub items_entregados: Vec<ItemEntrega>,
}

/// Validated per-item delivery plan line
#[derive(Debug, Clone, PartialEq)]
pub struct DeliveryLine {
    pub item_id: Uuid,
    pub material_id: Uuid,
    pub cantidad_solicitada: Decimal,
    pub cantidad_entregada: Decimal,
    pub faltante: Decimal,
}

/// Listing filter
#[derive(Debug, Default, Deserialize)]
pub struct SolicitudFilter {
    pub estado: Option<EstadoSolicitud>,
}

impl SolicitudService {
    /// Create a new SolicitudService instance
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    fn notificaciones(&self) -> NotificacionService {
        NotificacionService::new(self.db.clone())
    }

    /// Create a grouped material request. Student requests start `pendiente`
    /// awaiting their designated teacher; teacher requests are approved on
    /// creation and land directly in `entrega_pendiente`.
    pub async fn create(
        &self,
        user: &AuthUser,
        input: CreateSolicitudInput,
    ) -> AppResult<SolicitudDetalle> {
        policy::check(user, Operation::CreateSolicitud)?;

        if input.items.is_empty() {
            return Err(AppError::ValidationError(
                "A request needs at least one item".to_string(),
            ));
        }
        for item in &input.items {
            require_positive("cantidad", item.cantidad)?;
        }
        if input.fecha_devolucion < input.fecha_recoleccion {
            return Err(AppError::Validation {
                field: "fecha_devolucion".to_string(),
                message: "Return date cannot precede the pickup date".to_string(),
                message_es: "La fecha de devolución no puede ser anterior a la de recolección"
                    .to_string(),
            });
        }

        // Requesters with open debts may not open new requests
        if AdeudoService::new(self.db.clone())
            .has_open_debts(user.user_id)
            .await?
        {
            return Err(AppError::Conflict {
                resource: "adeudos".to_string(),
                message: "Outstanding debts must be settled before requesting again".to_string(),
                message_es: "Debes liquidar tus adeudos antes de crear otra solicitud".to_string(),
            });
        }

        let docente_id = match user.role {
            Role::Student => {
                let docente_id = input.docente_id.ok_or_else(|| AppError::Validation {
                    field: "docente_id".to_string(),
                    message: "Student requests need an approving teacher".to_string(),
                    message_es: "Las solicitudes de alumnos requieren un docente".to_string(),
                })?;

                let is_teacher = sqlx::query_scalar::<_, bool>(
                    "SELECT EXISTS(SELECT 1 FROM usuarios WHERE id = $1 AND role = 'teacher' AND is_active)",
                )
                .bind(docente_id)
                .fetch_one(&self.db)
                .await?;

                if !is_teacher {
                    return Err(AppError::NotFound("Teacher".to_string()));
                }
                Some(docente_id)
            }
            _ => None,
        };

        let estado_inicial = match user.role {
            Role::Teacher => EstadoSolicitud::EntregaPendiente,
            _ => EstadoSolicitud::Pendiente,
        };

        let mut tx = self.db.begin().await?;

        // Logical stock check at creation; the hard guard runs at delivery
        for item in &input.items {
            let stock = sqlx::query_scalar::<_, Decimal>(
                "SELECT stock FROM materiales WHERE id = $1",
            )
            .bind(item.material_id)
            .fetch_optional(&mut *tx)
            .await?
            .ok_or_else(|| AppError::NotFound("Material".to_string()))?;

            if item.cantidad > stock {
                return Err(AppError::InsufficientStock(format!(
                    "requested {} but only {} in stock for material {}",
                    item.cantidad, stock, item.material_id
                )));
            }
        }

        let folio = Self::next_folio(&mut tx).await?;

        let solicitud = sqlx::query_as::<_, SolicitudRow>(
            r#"
            INSERT INTO solicitudes (folio, solicitante_id, solicitante_role, docente_id, estado,
                                     fecha_recoleccion, fecha_devolucion)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING id, folio, solicitante_id, solicitante_role, docente_id, estado,
                      fecha_recoleccion, fecha_devolucion, created_at
            "#,
        )
        .bind(&folio)
        .bind(user.user_id)
        .bind(user.role.as_str())
        .bind(docente_id)
        .bind(estado_inicial.as_str())
        .bind(input.fecha_recoleccion)
        .bind(input.fecha_devolucion)
        .fetch_one(&mut *tx)
        .await?;

        let mut items = Vec::with_capacity(input.items.len());
        for item in &input.items {
            let row = sqlx::query_as::<_, ItemRow>(
                r#"
                INSERT INTO solicitud_items (solicitud_id, material_id, cantidad_solicitada, cantidad_entregada, tipo)
                SELECT $1, m.id, $3, $3, m.tipo
                FROM materiales m
                WHERE m.id = $2
                RETURNING id, solicitud_id, material_id, cantidad_solicitada, cantidad_entregada, tipo
                "#,
            )
            .bind(solicitud.id)
            .bind(item.material_id)
            .bind(item.cantidad)
            .fetch_one(&mut *tx)
            .await?;
            items.push(row);
        }

        tx.commit().await?;

        let notificaciones = self.notificaciones();
        notificaciones
            .notify(
                user.user_id,
                NotificacionTipo::Solicitud,
                format!("Tu solicitud {} fue registrada", folio),
            )
            .await?;
        if let Some(docente_id) = docente_id {
            notificaciones
                .notify(
                    docente_id,
                    NotificacionTipo::Solicitud,
                    format!("La solicitud {} espera tu aprobación", folio),
                )
                .await?;
        }

        Ok(SolicitudDetalle { solicitud, items })
    }

    /// Approve a pending request. Applies `pendiente -> aprobada ->
    /// entrega_pendiente` in one call; only the designated teacher or an
    /// admin may approve.
    pub async fn aprobar(&self, user: &AuthUser, solicitud_id: Uuid) -> AppResult<SolicitudRow> {
        policy::check(user, Operation::ApproveSolicitud)?;
        let solicitud = self.get_row(solicitud_id).await?;
        self.require_designated_or_admin(user, &solicitud)?;

        let estado = Self::parse_estado(&solicitud.estado)?;
        if !(estado.can_transition_to(EstadoSolicitud::Aprobada)
            && EstadoSolicitud::Aprobada.can_transition_to(EstadoSolicitud::EntregaPendiente))
        {
            return Err(AppError::InvalidStateTransition(format!(
                "cannot approve a request in state {}",
                solicitud.estado
            )));
        }

        let updated = self
            .transition(solicitud_id, estado, EstadoSolicitud::EntregaPendiente)
            .await?;

        self.notificaciones()
            .notify(
                updated.solicitante_id,
                NotificacionTipo::Solicitud,
                format!("Tu solicitud {} fue aprobada, pasa por tu material", updated.folio),
            )
            .await?;

        Ok(updated)
    }

    /// Reject a request (legal from `pendiente` and `aprobada`)
    pub async fn rechazar(&self, user: &AuthUser, solicitud_id: Uuid) -> AppResult<SolicitudRow> {
        policy::check(user, Operation::RejectSolicitud)?;
        let solicitud = self.get_row(solicitud_id).await?;
        self.require_designated_or_admin(user, &solicitud)?;

        let estado = Self::parse_estado(&solicitud.estado)?;
        if !estado.can_transition_to(EstadoSolicitud::Rechazada) {
            return Err(AppError::InvalidStateTransition(format!(
                "cannot reject a request in state {}",
                solicitud.estado
            )));
        }

        let updated = self
            .transition(solicitud_id, estado, EstadoSolicitud::Rechazada)
            .await?;

        self.notificaciones()
            .notify(
                updated.solicitante_id,
                NotificacionTipo::Solicitud,
                format!("Tu solicitud {} fue rechazada", updated.folio),
            )
            .await?;

        Ok(updated)
    }

    /// Cancel a request. Before approval only the requester may cancel;
    /// once ready for pickup, the requesting student or a storekeeper with
    /// stock access may.
    pub async fn cancelar(&self, user: &AuthUser, solicitud_id: Uuid) -> AppResult<SolicitudRow> {
        policy::check(user, Operation::CancelSolicitud)?;
        let solicitud = self.get_row(solicitud_id).await?;
        let estado = Self::parse_estado(&solicitud.estado)?;

        let is_requester = solicitud.solicitante_id == user.user_id;
        let allowed = match estado {
            EstadoSolicitud::Pendiente => is_requester,
            EstadoSolicitud::EntregaPendiente => {
                user.role == Role::Storekeeper || (user.role == Role::Student && is_requester)
            }
            _ => {
                return Err(AppError::InvalidStateTransition(format!(
                    "cannot cancel a request in state {}",
                    solicitud.estado
                )))
            }
        };

        if !allowed {
            return Err(AppError::Forbidden(
                "you may not cancel this request".to_string(),
            ));
        }

        let updated = self
            .transition(solicitud_id, estado, EstadoSolicitud::Cancelado)
            .await?;

        self.notificaciones()
            .notify(
                updated.solicitante_id,
                NotificacionTipo::Solicitud,
                format!("La solicitud {} fue cancelada", updated.folio),
            )
            .await?;

        Ok(updated)
    }

    /// Deliver a request. One transaction covers the ledger debits, item
    /// quantity updates, adeudo creation, and the state change; any failing
    /// line aborts them all.
    pub async fn entregar(
        &self,
        user: &AuthUser,
        solicitud_id: Uuid,
        input: EntregaInput,
    ) -> AppResult<SolicitudDetalle> {
        policy::check(user, Operation::DeliverSolicitud)?;

        let solicitud = self.get_row(solicitud_id).await?;
        let estado = Self::parse_estado(&solicitud.estado)?;
        if !estado.can_transition_to(EstadoSolicitud::Entregada) {
            return Err(AppError::InvalidStateTransition(format!(
                "cannot deliver a request in state {}",
                solicitud.estado
            )));
        }

        let items = self.get_items(solicitud_id).await?;
        let plan = plan_entrega(&items, &input.items_entregados)
            .map_err(AppError::ValidationError)?;

        let mut tx = self.db.begin().await?;
        let mut any_shortfall = false;

        for line in &plan {
            if line.cantidad_entregada > Decimal::ZERO {
                InventoryService::adjust_in_tx(
                    &mut tx,
                    line.material_id,
                    -line.cantidad_entregada,
                    MovimientoMotivo::Salida,
                    user.user_id,
                    Some(solicitud.folio.clone()),
                )
                .await?;
            }

            sqlx::query(
                "UPDATE solicitud_items SET cantidad_entregada = $2 WHERE id = $1",
            )
            .bind(line.item_id)
            .bind(line.cantidad_entregada)
            .execute(&mut *tx)
            .await?;

            if line.faltante > Decimal::ZERO {
                any_shortfall = true;
                AdeudoService::record_shortfall_in_tx(
                    &mut tx,
                    line.item_id,
                    solicitud.solicitante_id,
                    line.material_id,
                    line.faltante,
                )
                .await?;
            }
        }

        let rows = sqlx::query(
            "UPDATE solicitudes SET estado = $2 WHERE id = $1 AND estado = $3",
        )
        .bind(solicitud_id)
        .bind(EstadoSolicitud::Entregada.as_str())
        .bind(EstadoSolicitud::EntregaPendiente.as_str())
        .execute(&mut *tx)
        .await?;

        if rows.rows_affected() == 0 {
            return Err(AppError::InvalidStateTransition(
                "request state changed while delivering".to_string(),
            ));
        }

        tx.commit().await?;

        let notificaciones = self.notificaciones();
        notificaciones
            .notify(
                solicitud.solicitante_id,
                NotificacionTipo::Entrega,
                format!("Tu solicitud {} fue entregada", solicitud.folio),
            )
            .await?;
        if any_shortfall {
            notificaciones
                .notify(
                    solicitud.solicitante_id,
                    NotificacionTipo::Adeudo,
                    format!(
                        "La solicitud {} quedó con material pendiente registrado como adeudo",
                        solicitud.folio
                    ),
                )
                .await?;
        }

        let solicitud = self.get_row(solicitud_id).await?;
        let items = self.get_items(solicitud_id).await?;
        Ok(SolicitudDetalle { solicitud, items })
    }

    /// Expire pickups whose date passed more than `grace_days` ago. Called
    /// by the janitor. The state flip and its notification commit in one
    /// transaction, so each expired request gets exactly one notice and a
    /// failed tick retries whole.
    pub async fn expirar_vencidas(&self, grace_days: i64) -> AppResult<u64> {
        let cutoff = Utc::now().date_naive() - Duration::days(grace_days);

        let mut tx = self.db.begin().await?;

        let expired = sqlx::query_as::<_, SolicitudRow>(
            r#"
            UPDATE solicitudes
            SET estado = 'sin_recoleccion'
            WHERE estado = 'entrega_pendiente' AND fecha_recoleccion < $1
            RETURNING id, folio, solicitante_id, solicitante_role, docente_id, estado,
                      fecha_recoleccion, fecha_devolucion, created_at
            "#,
        )
        .bind(cutoff)
        .fetch_all(&mut *tx)
        .await?;

        for solicitud in &expired {
            NotificacionService::notify_in_tx(
                &mut tx,
                solicitud.solicitante_id,
                NotificacionTipo::Sistema,
                format!(
                    "Tu solicitud {} expiró por falta de recolección",
                    solicitud.folio
                ),
            )
            .await?;
        }

        tx.commit().await?;

        Ok(expired.len() as u64)
    }

    /// Get a request with its items; requesters see their own, designated
    /// teachers theirs to approve, storekeepers and admins everything.
    pub async fn get(&self, user: &AuthUser, solicitud_id: Uuid) -> AppResult<SolicitudDetalle> {
        let solicitud = self.get_row(solicitud_id).await?;

        let can_view = solicitud.solicitante_id == user.user_id
            || solicitud.docente_id == Some(user.user_id)
            || policy::allows(user.role, Operation::ListAllSolicitudes);

        if !can_view {
            return Err(AppError::Forbidden(
                "you may not view this request".to_string(),
            ));
        }

        let items = self.get_items(solicitud_id).await?;
        Ok(SolicitudDetalle { solicitud, items })
    }

    /// Role-scoped listing
    pub async fn list(
        &self,
        user: &AuthUser,
        filter: SolicitudFilter,
    ) -> AppResult<Vec<SolicitudRow>> {
        let estado = filter.estado.map(|e| e.as_str().to_string());

        let solicitudes = if policy::allows(user.role, Operation::ListAllSolicitudes) {
            sqlx::query_as::<_, SolicitudRow>(
                r#"
                SELECT id, folio, solicitante_id, solicitante_role, docente_id, estado,
                       fecha_recoleccion, fecha_devolucion, created_at
                FROM solicitudes
                WHERE ($1::text IS NULL OR estado = $1)
                ORDER BY created_at DESC
                "#,
            )
            .bind(estado)
            .fetch_all(&self.db)
            .await?
        } else {
            // Requesters see their own; teachers additionally the ones
            // designated to them
            sqlx::query_as::<_, SolicitudRow>(
                r#"
                SELECT id, folio, solicitante_id, solicitante_role, docente_id, estado,
                       fecha_recoleccion, fecha_devolucion, created_at
                FROM solicitudes
                WHERE (solicitante_id = $1 OR docente_id = $1)
                  AND ($2::text IS NULL OR estado = $2)
                ORDER BY created_at DESC
                "#,
            )
            .bind(user.user_id)
            .bind(estado)
            .fetch_all(&self.db)
            .await?
        };

        Ok(solicitudes)
    }

    // ------------------------------------------------------------------
    // Internals
    // ------------------------------------------------------------------

    async fn get_row(&self, solicitud_id: Uuid) -> AppResult<SolicitudRow> {
        let solicitud = sqlx::query_as::<_, SolicitudRow>(
            r#"
            SELECT id, folio, solicitante_id, solicitante_role, docente_id, estado,
                   fecha_recoleccion, fecha_devolucion, created_at
            FROM solicitudes
            WHERE id = $1
            "#,
        )
        .bind(solicitud_id)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Solicitud".to_string()))?;

        Ok(solicitud)
    }

    async fn get_items(&self, solicitud_id: Uuid) -> AppResult<Vec<ItemRow>> {
        let items = sqlx::query_as::<_, ItemRow>(
            r#"
            SELECT id, solicitud_id, material_id, cantidad_solicitada, cantidad_entregada, tipo
            FROM solicitud_items
            WHERE solicitud_id = $1
            ORDER BY id
            "#,
        )
        .bind(solicitud_id)
        .fetch_all(&self.db)
        .await?;

        Ok(items)
    }

    /// Conditional state update: refuses if a concurrent caller already
    /// moved the request.
    async fn transition(
        &self,
        solicitud_id: Uuid,
        from: EstadoSolicitud,
        to: EstadoSolicitud,
    ) -> AppResult<SolicitudRow> {
        let updated = sqlx::query_as::<_, SolicitudRow>(
            r#"
            UPDATE solicitudes
            SET estado = $2
            WHERE id = $1 AND estado = $3
            RETURNING id, folio, solicitante_id, solicitante_role, docente_id, estado,
                      fecha_recoleccion, fecha_devolucion, created_at
            "#,
        )
        .bind(solicitud_id)
        .bind(to.as_str())
        .bind(from.as_str())
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| {
            AppError::InvalidStateTransition("request state changed concurrently".to_string())
        })?;

        Ok(updated)
    }

    fn require_designated_or_admin(
        &self,
        user: &AuthUser,
        solicitud: &SolicitudRow,
    ) -> AppResult<()> {
        if user.role == Role::Teacher && solicitud.docente_id != Some(user.user_id) {
            return Err(AppError::Forbidden(
                "only the designated teacher may decide this request".to_string(),
            ));
        }
        Ok(())
    }

    fn parse_estado(estado: &str) -> AppResult<EstadoSolicitud> {
        EstadoSolicitud::parse(estado)
            .ok_or_else(|| AppError::Internal(format!("unknown request state: {}", estado)))
    }

    async fn next_folio(tx: &mut sqlx::Transaction<'_, sqlx::Postgres>) -> AppResult<String> {
        let seq = sqlx::query_scalar::<_, i64>("SELECT nextval('solicitud_folio_seq')")
            .fetch_one(&mut **tx)
            .await?;
        Ok(format!("SOL-{}-{:06}", Utc::now().year(), seq))
    }
}

/// Validate a delivery list against a request's items and produce the
/// per-line plan. Every item must appear exactly once; quantities are
/// clamp-rejected, never truncated.
pub fn plan_entrega(
    items: &[ItemRow],
    entregas: &[ItemEntrega],
) -> Result<Vec<DeliveryLine>, String> {
    if entregas.len() != items.len() {
        return Err(format!(
            "delivery list must cover all {} items, got {}",
            items.len(),
            entregas.len()
        ));
    }

    let mut plan = Vec::with_capacity(items.len());
    for item in items {
        let matched: Vec<&ItemEntrega> = entregas
            .iter()
            .filter(|e| e.item_id == item.id)
            .collect();

        let entrega = match matched.as_slice() {
            [one] => *one,
            [] => return Err(format!("missing delivery entry for item {}", item.id)),
            _ => return Err(format!("duplicate delivery entry for item {}", item.id)),
        };

        validate_cantidad_entregada(entrega.cantidad_entregada, item.cantidad_solicitada)
            .map_err(|msg| format!("item {}: {}", item.id, msg))?;

        plan.push(DeliveryLine {
            item_id: item.id,
            material_id: item.material_id,
            cantidad_solicitada: item.cantidad_solicitada,
            cantidad_entregada: entrega.cantidad_entregada,
            faltante: item.cantidad_solicitada - entrega.cantidad_entregada,
        });
    }

    Ok(plan)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn item(cantidad: &str) -> ItemRow {
        ItemRow {
            id: Uuid::new_v4(),
            solicitud_id: Uuid::new_v4(),
            material_id: Uuid::new_v4(),
            cantidad_solicitada: dec(cantidad),
            cantidad_entregada: dec(cantidad),
            tipo: "liquido".to_string(),
        }
    }

    #[test]
    fn plan_computes_shortfall() {
        let items = vec![item("500")];
        let entregas = vec![ItemEntrega {
            item_id: items[0].id,
            cantidad_entregada: dec("300"),
        }];

        let plan = plan_entrega(&items, &entregas).unwrap();
        assert_eq!(plan.len(), 1);
        assert_eq!(plan[0].faltante, dec("200"));
    }

    #[test]
    fn plan_rejects_over_delivery() {
        let items = vec![item("500")];
        let entregas = vec![ItemEntrega {
            item_id: items[0].id,
            cantidad_entregada: dec("501"),
        }];

        assert!(plan_entrega(&items, &entregas).is_err());
    }

    #[test]
    fn plan_requires_full_coverage() {
        let items = vec![item("10"), item("20")];
        let entregas = vec![ItemEntrega {
            item_id: items[0].id,
            cantidad_entregada: dec("10"),
        }];

        assert!(plan_entrega(&items, &entregas).is_err());
    }

    #[test]
    fn plan_rejects_duplicates_and_strangers() {
        let items = vec![item("10")];
        let dup = vec![
            ItemEntrega {
                item_id: items[0].id,
                cantidad_entregada: dec("5"),
            },
            ItemEntrega {
                item_id: items[0].id,
                cantidad_entregada: dec("5"),
            },
        ];
        assert!(plan_entrega(&items, &dup).is_err());

        let stranger = vec![ItemEntrega {
            item_id: Uuid::new_v4(),
            cantidad_entregada: dec("10"),
        }];
        assert!(plan_entrega(&items, &stranger).is_err());
    }

    #[test]
    fn plan_allows_zero_delivery_as_full_shortfall() {
        let items = vec![item("40")];
        let entregas = vec![ItemEntrega {
            item_id: items[0].id,
            cantidad_entregada: Decimal::ZERO,
        }];

        let plan = plan_entrega(&items, &entregas).unwrap();
        assert_eq!(plan[0].faltante, dec("40"));
    }
}
