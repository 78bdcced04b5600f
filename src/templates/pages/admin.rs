use crate::db::ingest_runs::IngestRun;
use crate::templates::desktop_layout;
use maud::{html, Markup};

pub fn admin_page(runs: &[IngestRun], total_listings: i64) -> Markup {
    desktop_layout(
        "Admin",
        html! {
            main class="container" {
                h1 { "Admin" }

                div class="card" style="margin-bottom: 2rem;" {
                    h3 { "Listings Feed" }
                    p { strong { (total_listings) } " listings stored." }
                    form action="/admin/ingest" method="post" style="margin: 0;" {
                        button type="submit" style="padding: 8px 16px; background: #10b981; color: white; border: none; border-radius: 4px; cursor: pointer;" {
                            "Refresh from feed"
                        }
                    }
                }

                div class="card" {
                    h3 { "Recent Ingest Runs" }
                    div style="overflow-x: auto;" {
                        table style="width: 100%; border-collapse: collapse; font-size: 0.9em;" {
                            thead {
                                tr {
                                    th style="padding: 8px; text-align: left; border-bottom: 2px solid #eee;" { "ID" }
                                    th style="padding: 8px; text-align: left; border-bottom: 2px solid #eee;" { "Started" }
                                    th style="padding: 8px; text-align: left; border-bottom: 2px solid #eee;" { "Status" }
                                    th style="padding: 8px; text-align: left; border-bottom: 2px solid #eee;" { "Saved" }
                                    th style="padding: 8px; text-align: left; border-bottom: 2px solid #eee;" { "Skipped" }
                                }
                            }
                            tbody {
                                @for run in runs {
                                    tr {
                                        td style="padding: 8px; border-bottom: 1px solid #f9f9f9;" { (run.id) }
                                        td style="padding: 8px; border-bottom: 1px solid #f9f9f9;" { (run.started_at) }
                                        td style="padding: 8px; border-bottom: 1px solid #f9f9f9;" {
                                            @if run.finished_at.is_none() {
                                                span style="color: blue;" { "Running..." }
                                            } @else if run.unchanged {
                                                span style="color: #6b7280;" { "Unchanged" }
                                            } @else if run.success == Some(true) {
                                                span style="color: green;" { "Success" }
                                            } @else {
                                                span style="color: red;" { "Failed" }
                                                @if let Some(err) = &run.error_message {
                                                    br; span style="font-size: 0.8em; color: #666;" { (err) }
                                                }
                                            }
                                        }
                                        td style="padding: 8px; border-bottom: 1px solid #f9f9f9;" { (run.listings_seen.unwrap_or(0)) }
                                        td style="padding: 8px; border-bottom: 1px solid #f9f9f9;" { (run.skipped.unwrap_or(0)) }
                                    }
                                }
                            }
                        }
                    }
                }
            }
        },
    )
}
