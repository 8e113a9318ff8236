//! Access point rendering.

use crate::application::ports::Logger;
use crate::domain::AccessPoints;
use crate::output::OutputContext;

/// Render access points as display lines (unstyled URL).
#[must_use]
pub fn render(points: &AccessPoints, bold: impl Fn(&str) -> String) -> Vec<String> {
    let mut lines = vec![format!(
        "   Ingress HTTP:  {}   # UI at '/', backend under '/api'",
        bold(&points.ingress_url)
    )];
    if !points.port_forwards.is_empty() {
        lines.push(String::new());
        lines.push("Or use port-forward if needed (optional):".to_string());
        let width = points
            .port_forwards
            .iter()
            .map(|pf| pf.name.len() + 1)
            .max()
            .unwrap_or(0);
        for pf in &points.port_forwards {
            lines.push(format!(
                "  {:<width$}  {}  # {}",
                format!("{}:", pf.name),
                pf.command,
                pf.local_url
            ));
        }
    }
    lines
}

/// Print the access points section.
pub fn print(ctx: &OutputContext, points: &AccessPoints) {
    ctx.header("Step 7: Access Points");
    for line in render(points, |s| ctx.bold(s)) {
        ctx.line(&line);
    }
}
