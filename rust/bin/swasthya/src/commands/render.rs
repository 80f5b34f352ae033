//! Dashboard output.

use anyhow::Result;
use swasthya_setu::DashboardView;

pub fn view(view: &DashboardView, json_output: bool) -> Result<()> {
    if json_output {
        println!("{}", serde_json::to_string_pretty(view)?);
        return Ok(());
    }

    let profile = match view {
        DashboardView::NoProfile => {
            println!("No profile is linked to this account.");
            return Ok(());
        }
        DashboardView::Profile(profile) => profile,
    };

    println!("{}", profile.greeting);
    println!();
    println!("User Profile ({})", profile.role_display);

    let rows: Vec<_> = profile.fields.iter().chain(profile.extra_rows.iter()).collect();
    let width = rows.iter().map(|r| r.label.len()).max().unwrap_or(0);
    for row in rows {
        println!("  {:<width$}  {}", format!("{}:", row.label), row.value, width = width + 1);
    }

    for section in profile.sections() {
        println!();
        if !section.title.is_empty() {
            println!("{}", section.title);
        }
        println!("  {}", section.placeholder);
    }
    Ok(())
}
