use crate::domain::listing::RankedListing;
use crate::errors::ServerError;
use crate::responses::xlsx_response;
use crate::errors::ResultResp;
use rust_xlsxwriter::Workbook;

/// Writes the filtered, annotated results in their display order.
pub fn export_listings_xlsx(results: &[RankedListing], label: &str) -> ResultResp {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();

    // Headers
    let headers = [
        "Title",
        "Location",
        "Address",
        "Type",
        "Price (EUR)",
        "Bills Included",
        "Amenities",
        "Km to Search",
        "Km to Campus",
    ];

    for (col, header) in headers.iter().enumerate() {
        worksheet
            .write_string(0, col as u16, *header)
            .map_err(|e| {
                ServerError::XlsxError(format!("Failed to write header '{}': {}", header, e))
            })?;
    }

    for (i, result) in results.iter().enumerate() {
        let r = (i + 1) as u32;
        let l = &result.listing;

        worksheet
            .write_string(r, 0, &l.title)
            .map_err(|e| ServerError::XlsxError(format!("Failed to write title: {}", e)))?;

        worksheet
            .write_string(r, 1, &l.location)
            .map_err(|e| ServerError::XlsxError(format!("Failed to write location: {}", e)))?;

        worksheet
            .write_string(r, 2, &l.address)
            .map_err(|e| ServerError::XlsxError(format!("Failed to write address: {}", e)))?;

        worksheet
            .write_string(r, 3, &l.property_type)
            .map_err(|e| ServerError::XlsxError(format!("Failed to write type: {}", e)))?;

        // Unpriced rows stay blank rather than writing a fake zero.
        if let Some(price) = l.price {
            worksheet
                .write_number(r, 4, price)
                .map_err(|e| ServerError::XlsxError(format!("Failed to write price: {}", e)))?;
        }

        worksheet
            .write_string(r, 5, if l.bills_included { "Yes" } else { "No" })
            .map_err(|e| ServerError::XlsxError(format!("Failed to write bills flag: {}", e)))?;

        worksheet
            .write_string(r, 6, &l.amenities.join(", "))
            .map_err(|e| ServerError::XlsxError(format!("Failed to write amenities: {}", e)))?;

        if let Some(d) = result.distance_to_search {
            worksheet
                .write_number(r, 7, d)
                .map_err(|e| ServerError::XlsxError(format!("Failed to write distance: {}", e)))?;
        }

        if let Some(d) = result.distance_to_college {
            worksheet
                .write_number(r, 8, d)
                .map_err(|e| ServerError::XlsxError(format!("Failed to write distance: {}", e)))?;
        }
    }

    let buffer = workbook
        .save_to_buffer()
        .map_err(|e| ServerError::XlsxError(format!("Failed to save workbook: {}", e)))?;

    xlsx_response(buffer, &format!("listings_{label}.xlsx"))
}
