use sqlx::PgConnection;
use tracing::debug;

use super::models::{MachineRow, PartUsageRow, StockRow, TicketRow};
use crate::Result;

/// The four selects behind the machine history tree. Every parameter is
/// bound, never spliced into the SQL text.
pub struct MachineQueries;

impl MachineQueries {
    #[inline]
    pub async fn get_machine(
        conn: &mut PgConnection,
        machine_id: i64,
    ) -> Result<Option<MachineRow>> {
        let machine = sqlx::query_as::<_, MachineRow>(
            r#"
            SELECT m.id::bigint AS id,
                   m.plant_name,
                   m.designation
            FROM machine m
            WHERE m.id = $1
            "#,
        )
        .bind(machine_id)
        .fetch_optional(conn)
        .await?;

        Ok(machine)
    }

    #[inline]
    pub async fn list_tickets(
        conn: &mut PgConnection,
        machine_id: i64,
    ) -> Result<Vec<TicketRow>> {
        let tickets = sqlx::query_as::<_, TicketRow>(
            r#"
            SELECT mt.id::bigint AS id,
                   mt.ticket_number,
                   mt.opening_date,
                   mt.damage_description,
                   mt.cause,
                   mt.measure_taken
            FROM maintenance_ticket mt
            WHERE mt.machine_id = $1
            ORDER BY mt.opening_date, mt.id
            "#,
        )
        .bind(machine_id)
        .fetch_all(conn)
        .await?;

        debug!("Loaded {} tickets for machine {}", tickets.len(), machine_id);
        Ok(tickets)
    }

    /// Spare-part movements for every ticket of the machine, joined to the
    /// part's display fields.
    #[inline]
    pub async fn list_part_usage(
        conn: &mut PgConnection,
        machine_id: i64,
    ) -> Result<Vec<PartUsageRow>> {
        let usage = sqlx::query_as::<_, PartUsageRow>(
            r#"
            SELECT spm.maintenance_ticket_id::bigint AS maintenance_ticket_id,
                   spm.spare_part_id::bigint AS spare_part_id,
                   spm.quantity::bigint AS quantity,
                   spm.movement_date,
                   sp.designation AS part_name,
                   sp.manufacturer,
                   sp.supplier
            FROM spare_part_movement spm
            JOIN spare_part sp ON sp.id = spm.spare_part_id
            JOIN maintenance_ticket mt ON mt.id = spm.maintenance_ticket_id
            WHERE mt.machine_id = $1
            ORDER BY spm.movement_date, spm.id
            "#,
        )
        .bind(machine_id)
        .fetch_all(conn)
        .await?;

        debug!(
            "Loaded {} spare part movements for machine {}",
            usage.len(),
            machine_id
        );
        Ok(usage)
    }

    /// Stock rows for the given parts across every plant. The machine scope
    /// deliberately does not narrow this select.
    #[inline]
    pub async fn list_stock_levels(
        conn: &mut PgConnection,
        part_ids: &[i64],
    ) -> Result<Vec<StockRow>> {
        if part_ids.is_empty() {
            return Ok(Vec::new());
        }

        let stock = sqlx::query_as::<_, StockRow>(
            r#"
            SELECT sps.spare_part_id::bigint AS spare_part_id,
                   sps.plant_name,
                   sps.current_stock::bigint AS current_stock,
                   sps.unit_measure
            FROM spare_part_stock sps
            WHERE sps.spare_part_id = ANY($1)
            ORDER BY sps.spare_part_id, sps.plant_name
            "#,
        )
        .bind(part_ids)
        .fetch_all(conn)
        .await?;

        debug!("Loaded {} stock rows for {} parts", stock.len(), part_ids.len());
        Ok(stock)
    }
}
