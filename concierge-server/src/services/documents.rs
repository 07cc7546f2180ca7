//! Printable reservation and invoice documents
//!
//! Rendered as plain text and returned base64-encoded, ready to be saved
//! or attached by the dashboard.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use std::fmt::Write;

use crate::db::models::{Booking, Invoice, Reservation};

pub fn encode(document: &str) -> String {
    STANDARD.encode(document.as_bytes())
}

fn money(amount: f64) -> String {
    format!("{:.2}", amount)
}

pub fn reservation_document(reservation: &Reservation) -> String {
    let mut doc = String::new();
    let _ = writeln!(doc, "RESERVATION {}", reservation.id_string());
    let _ = writeln!(doc, "Business: {} ({})", reservation.business_id, reservation.business_type);
    let _ = writeln!(doc);
    let _ = writeln!(doc, "Customer: {}", reservation.customer_info.name);
    let _ = writeln!(doc, "Email: {}", reservation.customer_info.email);
    let _ = writeln!(doc, "Phone: {}", reservation.customer_info.phone);
    let _ = writeln!(doc);

    match &reservation.booking {
        Booking::Room(stay) => {
            let _ = writeln!(doc, "Room: {}", stay.room_id);
            let _ = writeln!(doc, "Check-in: {}", stay.check_in);
            let _ = writeln!(doc, "Check-out: {}", stay.check_out);
            let _ = writeln!(doc, "Guests: {}", stay.guests);
        }
        Booking::Table(table) => {
            let _ = writeln!(doc, "Table: {}", table.table_id);
            let _ = writeln!(doc, "Party size: {}", table.party_size);
        }
        Booking::Service(service) => {
            let _ = writeln!(doc, "Service: {}", service.service_id);
            if let Some(staff_id) = &service.staff_id {
                let _ = writeln!(doc, "Staff: {}", staff_id);
            }
        }
    }

    let _ = writeln!(doc, "Date: {}", reservation.date);
    if let Some(time) = &reservation.time {
        let _ = writeln!(doc, "Time: {}", time);
    }
    if let Some(duration) = reservation.duration {
        let _ = writeln!(doc, "Duration: {} min", duration);
    }
    let _ = writeln!(doc, "Status: {}", reservation.status.as_str());
    if let Some(total) = reservation.total_amount {
        let _ = writeln!(doc, "Total: {}", money(total));
    }
    if let Some(requests) = &reservation.special_requests {
        let _ = writeln!(doc, "Special requests: {}", requests);
    }
    doc
}

pub fn invoice_document(invoice: &Invoice) -> String {
    let mut doc = String::new();
    let _ = writeln!(doc, "INVOICE {}", invoice.id_string());
    let _ = writeln!(doc, "Date: {}", invoice.date);
    let _ = writeln!(doc, "Reservation: {}", invoice.reservation_id);
    let _ = writeln!(doc);
    for item in &invoice.items {
        let _ = writeln!(
            doc,
            "{} x{} @ {} = {}",
            item.description,
            item.quantity,
            money(item.price),
            money(item.total)
        );
    }
    let _ = writeln!(doc);
    let _ = writeln!(doc, "TOTAL: {}", money(invoice.total));
    doc
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::models::{CustomerInfo, InvoiceItem, ServiceBooking};
    use chrono::NaiveDate;
    use shared::BusinessType;

    #[test]
    fn test_invoice_document_lists_items_and_total() {
        let invoice = Invoice {
            id: Some(surrealdb::RecordId::from_table_key("invoice", "i1")),
            business_id: "business:h1".into(),
            business_type: BusinessType::Hotel,
            reservation_id: "reservation:r1".into(),
            date: NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
            items: vec![InvoiceItem {
                description: "Night".into(),
                price: 120.0,
                quantity: 2,
                total: 240.0,
            }],
            total: 240.0,
            is_active: true,
            created_at: 0,
            updated_at: 0,
        };
        let doc = invoice_document(&invoice);
        assert!(doc.starts_with("INVOICE invoice:i1\n"));
        assert!(doc.contains("Night x2 @ 120.00 = 240.00"));
        assert!(doc.contains("TOTAL: 240.00"));
    }

    #[test]
    fn test_reservation_document_is_base64() {
        let reservation = Reservation {
            id: None,
            business_id: "business:s1".into(),
            business_type: BusinessType::Salon,
            booking: Booking::Service(ServiceBooking {
                service_id: "service:cut".into(),
                staff_id: Some("staff:ann".into()),
            }),
            customer_info: CustomerInfo {
                name: "Jo".into(),
                email: "jo@example.com".into(),
                phone: "0600".into(),
            },
            customer_id: None,
            date: NaiveDate::from_ymd_opt(2024, 3, 2).unwrap(),
            time: Some("10:30".into()),
            duration: Some(45),
            status: Default::default(),
            payment_status: Default::default(),
            payment_method: None,
            source: Default::default(),
            total_amount: Some(35.0),
            notes: None,
            special_requests: None,
            reminder_sent: false,
            reservation_file_url: None,
            is_active: true,
            created_at: 0,
            updated_at: 0,
        };
        let doc = reservation_document(&reservation);
        assert!(doc.contains("Staff: staff:ann"));
        assert!(doc.contains("Time: 10:30"));

        let decoded = STANDARD.decode(encode(&doc)).unwrap();
        assert_eq!(String::from_utf8(decoded).unwrap(), doc);
    }
}
