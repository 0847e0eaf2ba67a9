use super::*;
use chrono::NaiveDate;

fn opening_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 3, 18).expect("valid date")
}

#[test]
fn machine_history_serializes_with_wire_field_names() {
    let history = MachineHistory {
        machine_id: 7,
        plant_name: "Plant-1".to_string(),
        machine_designation: "Cold Saw".to_string(),
        maintenance_tickets: vec![MaintenanceTicket {
            ticket_id: 42,
            ticket_number: "T-0042".to_string(),
            opening_date: Some(opening_date()),
            damage_description: Some("Blade misalignment".to_string()),
            cause: None,
            measure_taken: Some("Realigned blade".to_string()),
            spare_parts_used: vec![SparePartUsage {
                part_id: 9,
                part_name: "Saw blade".to_string(),
                manufacturer: Some("Acme".to_string()),
                supplier: None,
                quantity_used: 1,
                movement_date: Some(opening_date()),
                current_stock: vec![StockLevel {
                    plant_name: "Plant-2".to_string(),
                    current_stock: 12,
                    unit_measure: Some("pcs".to_string()),
                }],
            }],
        }],
    };

    let value = serde_json::to_value(&history).expect("Failed to serialize history");

    assert_eq!(value["machine_id"], 7);
    assert_eq!(value["plant_name"], "Plant-1");
    assert_eq!(value["machine_designation"], "Cold Saw");

    let ticket = &value["maintenance_tickets"][0];
    assert_eq!(ticket["ticket_id"], 42);
    assert_eq!(ticket["ticket_number"], "T-0042");
    assert_eq!(ticket["opening_date"], "2024-03-18");
    assert_eq!(ticket["cause"], serde_json::Value::Null);

    let usage = &ticket["spare_parts_used"][0];
    assert_eq!(usage["part_id"], 9);
    assert_eq!(usage["part_name"], "Saw blade");
    assert_eq!(usage["quantity_used"], 1);

    let stock = &usage["current_stock"][0];
    assert_eq!(stock["plant_name"], "Plant-2");
    assert_eq!(stock["current_stock"], 12);
    assert_eq!(stock["unit_measure"], "pcs");
}

#[test]
fn empty_ticket_list_serializes_as_empty_array() {
    let history = MachineHistory {
        machine_id: 3,
        plant_name: "Plant-1".to_string(),
        machine_designation: "Press".to_string(),
        maintenance_tickets: Vec::new(),
    };

    let value = serde_json::to_value(&history).expect("Failed to serialize history");
    assert_eq!(
        value["maintenance_tickets"],
        serde_json::Value::Array(Vec::new())
    );
}

#[test]
fn history_round_trips_through_json() {
    let history = MachineHistory {
        machine_id: 1,
        plant_name: "Plant-1".to_string(),
        machine_designation: "Roller".to_string(),
        maintenance_tickets: vec![MaintenanceTicket {
            ticket_id: 5,
            ticket_number: "T-0005".to_string(),
            opening_date: None,
            damage_description: None,
            cause: None,
            measure_taken: None,
            spare_parts_used: Vec::new(),
        }],
    };

    let json = serde_json::to_string(&history).expect("Failed to serialize history");
    let parsed: MachineHistory = serde_json::from_str(&json).expect("Failed to parse history");
    assert_eq!(parsed, history);
}
