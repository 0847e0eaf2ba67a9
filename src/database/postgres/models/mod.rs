#[cfg(test)]
mod tests;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

// Raw row shapes returned by the four history selects.

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct MachineRow {
    pub id: i64,
    pub plant_name: String,
    pub designation: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct TicketRow {
    pub id: i64,
    pub ticket_number: String,
    pub opening_date: Option<NaiveDate>,
    pub damage_description: Option<String>,
    pub cause: Option<String>,
    pub measure_taken: Option<String>,
}

/// One spare-part consumption joined to the part's display fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct PartUsageRow {
    pub maintenance_ticket_id: i64,
    pub spare_part_id: i64,
    pub quantity: i64,
    pub movement_date: Option<NaiveDate>,
    pub part_name: String,
    pub manufacturer: Option<String>,
    pub supplier: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct StockRow {
    pub spare_part_id: i64,
    pub plant_name: String,
    pub current_stock: i64,
    pub unit_measure: Option<String>,
}

// The assembled tree handed to the prompt stage. Field names are the wire
// format consumed downstream; renaming them changes the rendered context.

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MachineHistory {
    pub machine_id: i64,
    pub plant_name: String,
    pub machine_designation: String,
    pub maintenance_tickets: Vec<MaintenanceTicket>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MaintenanceTicket {
    pub ticket_id: i64,
    pub ticket_number: String,
    pub opening_date: Option<NaiveDate>,
    pub damage_description: Option<String>,
    pub cause: Option<String>,
    pub measure_taken: Option<String>,
    pub spare_parts_used: Vec<SparePartUsage>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SparePartUsage {
    pub part_id: i64,
    pub part_name: String,
    pub manufacturer: Option<String>,
    pub supplier: Option<String>,
    pub quantity_used: i64,
    pub movement_date: Option<NaiveDate>,
    /// Stock rows for this part across every plant, not just the machine's.
    pub current_stock: Vec<StockLevel>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockLevel {
    pub plant_name: String,
    pub current_stock: i64,
    pub unit_measure: Option<String>,
}
