// Machine history aggregation
// Builds the machine -> tickets -> spare parts -> stock tree for one machine


use sqlx::{Connection, PgConnection};
use std::collections::{HashMap, HashSet};
use tracing::{debug, warn};

use crate::config::DatabaseConfig;
use crate::database::postgres::{
    self, MachineHistory, MachineQueries, MachineRow, MaintenanceTicket, PartUsageRow,
    SparePartUsage, StockLevel, StockRow, TicketRow,
};
use crate::{ReportError, Result};

/// Reject malformed machine identifiers before any database access.
#[inline]
pub fn validate_machine_id(machine_id: i64) -> Result<()> {
    if machine_id <= 0 {
        return Err(ReportError::Validation(format!(
            "Machine id must be a positive integer, got {}",
            machine_id
        )));
    }
    Ok(())
}

/// Fetch the full maintenance history tree for one machine.
///
/// Opens a fresh connection, runs the four history selects and assembles the
/// tree. `Ok(None)` means the identifier is valid but no such machine exists;
/// that is a result, not an error. The connection is closed on every exit
/// path.
#[inline]
pub async fn fetch_machine_history(
    config: &DatabaseConfig,
    machine_id: i64,
) -> Result<Option<MachineHistory>> {
    validate_machine_id(machine_id)?;

    let mut conn = postgres::open_connection(config).await?;
    let result = fetch_with_connection(&mut conn, machine_id).await;

    // A close failure must not mask the fetch outcome.
    if let Err(e) = conn.close().await {
        warn!("Failed to close PostgreSQL connection cleanly: {}", e);
    }

    result
}

async fn fetch_with_connection(
    conn: &mut PgConnection,
    machine_id: i64,
) -> Result<Option<MachineHistory>> {
    let Some(machine) = MachineQueries::get_machine(conn, machine_id).await? else {
        debug!("Machine {} not found", machine_id);
        return Ok(None);
    };

    let tickets = MachineQueries::list_tickets(conn, machine_id).await?;
    let usage = MachineQueries::list_part_usage(conn, machine_id).await?;

    let part_ids = distinct_part_ids(&usage);
    let stock = MachineQueries::list_stock_levels(conn, &part_ids).await?;

    Ok(Some(assemble(machine, tickets, usage, stock)))
}

/// Assemble the nested history tree from the four flat result sets.
///
/// Stock rows are attached to every usage of their part regardless of plant;
/// the machine-level plant scope deliberately does not narrow them.
#[inline]
pub fn assemble(
    machine: MachineRow,
    tickets: Vec<TicketRow>,
    usage: Vec<PartUsageRow>,
    stock: Vec<StockRow>,
) -> MachineHistory {
    let mut stock_by_part: HashMap<i64, Vec<StockLevel>> = HashMap::new();
    for row in stock {
        stock_by_part
            .entry(row.spare_part_id)
            .or_default()
            .push(StockLevel {
                plant_name: row.plant_name,
                current_stock: row.current_stock,
                unit_measure: row.unit_measure,
            });
    }

    let mut usage_by_ticket: HashMap<i64, Vec<SparePartUsage>> = HashMap::new();
    for row in usage {
        let current_stock = stock_by_part
            .get(&row.spare_part_id)
            .cloned()
            .unwrap_or_default();

        usage_by_ticket
            .entry(row.maintenance_ticket_id)
            .or_default()
            .push(SparePartUsage {
                part_id: row.spare_part_id,
                part_name: row.part_name,
                manufacturer: row.manufacturer,
                supplier: row.supplier,
                quantity_used: row.quantity,
                movement_date: row.movement_date,
                current_stock,
            });
    }

    // A ticket must not appear twice even if several joined rows feed it.
    let mut seen = HashSet::new();
    let mut maintenance_tickets = Vec::with_capacity(tickets.len());
    for ticket in tickets {
        if !seen.insert(ticket.id) {
            continue;
        }

        maintenance_tickets.push(MaintenanceTicket {
            ticket_id: ticket.id,
            ticket_number: ticket.ticket_number,
            opening_date: ticket.opening_date,
            damage_description: ticket.damage_description,
            cause: ticket.cause,
            measure_taken: ticket.measure_taken,
            spare_parts_used: usage_by_ticket.remove(&ticket.id).unwrap_or_default(),
        });
    }

    MachineHistory {
        machine_id: machine.id,
        plant_name: machine.plant_name,
        machine_designation: machine.designation,
        maintenance_tickets,
    }
}

fn distinct_part_ids(usage: &[PartUsageRow]) -> Vec<i64> {
    let mut seen = HashSet::new();
    usage
        .iter()
        .map(|row| row.spare_part_id)
        .filter(|id| seen.insert(*id))
        .collect()
}
