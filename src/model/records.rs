//! Record layouts for each console module
//!
//! Column sets, row actions, and in-memory record updates for budget
//! lines, disbursement vouchers, and collection receipts.

use super::navigation::Module;
use crate::action::Action;
use crate::table::{ActionSource, Column, FieldValue, Row, RowAction};

/// Format a number with thousands separators and two decimals
pub fn format_amount(value: &FieldValue) -> String {
    let amount = match value {
        FieldValue::Number(n) => *n,
        FieldValue::Text(s) => match s.trim().replace(',', "").parse::<f64>() {
            Ok(n) => n,
            Err(_) => return s.clone(),
        },
        other => return other.to_string(),
    };

    let cents = (amount * 100.0).round();
    let formatted = format!("{:.2}", cents.abs() / 100.0);
    let (whole, fraction) = formatted.split_once('.').unwrap_or((formatted.as_str(), "00"));

    let mut grouped = String::new();
    for (i, digit) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    let sign = if cents < 0.0 { "-" } else { "" };
    format!("{}{}.{}", sign, grouped, fraction)
}

/// Columns shown for a module
pub fn columns_for(module: Module) -> Vec<Column> {
    match module {
        Module::Budget => vec![
            Column::new("id", "ID"),
            Column::new("fiscal_year", "FY"),
            Column::new("department", "Department"),
            Column::new("account_code", "Account"),
            Column::new("description", "Description"),
            Column::new("amount", "Appropriation")
                .render(format_amount)
                .class_name("amount"),
            Column::new("status", "Status").class_name("status"),
        ],
        Module::Disbursements => vec![
            Column::new("voucher_no", "Voucher"),
            Column::new("payee", "Payee"),
            Column::new("fund", "Fund"),
            Column::new("date", "Date"),
            Column::new("amount", "Amount")
                .render(format_amount)
                .class_name("amount"),
            Column::new("status", "Status").class_name("status"),
        ],
        Module::Collections => vec![
            Column::new("receipt_no", "OR No."),
            Column::new("payor", "Payor"),
            Column::new("nature", "Nature of Collection"),
            Column::new("collected_on", "Date"),
            Column::new("amount", "Amount")
                .render(format_amount)
                .class_name("amount"),
            Column::new("remarks", "Remarks").unsortable(),
        ],
    }
}

/// Message shown when a module's dataset has no records
pub fn empty_message_for(module: Module) -> String {
    match module {
        Module::Budget => "No budget lines have been encoded yet".to_string(),
        Module::Disbursements => "No disbursement vouchers on file".to_string(),
        Module::Collections => "No collections recorded".to_string(),
    }
}

fn status_of(row: &Row) -> String {
    row.get("status").to_string()
}

fn set_status_action(module: Module, icon: &str, title: &str, status: &'static str) -> RowAction<Action> {
    RowAction::new(icon, title, move |row| {
        row.id().map(|id| Action::SetRecordStatus {
            module,
            id,
            status: status.to_string(),
        })
    })
}

fn delete_action(module: Module) -> RowAction<Action> {
    RowAction::new("✗", "Delete", move |row| {
        row.id().map(|id| Action::ConfirmDeleteRecord { module, id })
    })
    .class_name("danger")
}

/// Row actions for a module.
///
/// Budget and disbursement actions depend on the record's status; every
/// collection receipt offers the same action.
pub fn actions_for(module: Module) -> ActionSource<Action> {
    match module {
        Module::Budget => ActionSource::computed(move |row| match status_of(row).as_str() {
            "Draft" => vec![
                set_status_action(module, "✓", "Post", "Posted"),
                delete_action(module),
            ],
            _ => Vec::new(),
        }),
        Module::Disbursements => ActionSource::computed(move |row| match status_of(row).as_str() {
            "Pending" => vec![
                set_status_action(module, "✓", "Approve", "Approved"),
                set_status_action(module, "✗", "Reject", "Rejected").class_name("danger"),
            ],
            "Approved" => vec![set_status_action(module, "➜", "Release", "Released")],
            _ => Vec::new(),
        }),
        Module::Collections => ActionSource::Static(vec![RowAction::new(
            "🧾",
            "View receipt",
            |row| Some(Action::OpenRecordDetail(row.clone())),
        )]),
    }
}

/// Set the status of the record with `id`. Returns whether it was found.
pub fn set_record_status(rows: &mut [Row], id: &str, status: &str) -> bool {
    match rows.iter_mut().find(|r| r.id().as_deref() == Some(id)) {
        Some(row) => {
            row.set("status", FieldValue::Text(status.to_string()));
            true
        }
        None => false,
    }
}

/// Remove the record with `id`. Returns whether it was found.
pub fn remove_record(rows: &mut Vec<Row>, id: &str) -> bool {
    let before = rows.len();
    rows.retain(|r| r.id().as_deref() != Some(id));
    rows.len() != before
}
