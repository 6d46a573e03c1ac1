use std::io::{self, Write};
use std::time::Duration;

use gridwalk_paths::{SearchResult, SearchStatus};

/// Prints the outcome of a run: the route and its cost, or why there is
/// none, followed by the work done and the time it took.
pub fn write_report<W: Write>(
    out: &mut W,
    result: &SearchResult,
    elapsed: Duration,
) -> io::Result<()> {
    match (result.status, result.final_cost) {
        (SearchStatus::Succeeded, Some(cost)) => {
            writeln!(out, "Done!")?;
            let cells = result.path.len();
            writeln!(out, "Route from start to goal ({cells} cells):")?;
            for (i, p) in result.path.iter().enumerate() {
                if i > 0 {
                    let sep = if i % 8 == 0 { "\n" } else { " " };
                    write!(out, "{sep}")?;
                }
                write!(out, "{p}")?;
            }
            writeln!(out)?;
            writeln!(out, "The final cost to reach the goal is: {cost}")?;
        }
        _ if result.stats.budget_exhausted => {
            let spent = result.stats.expansions;
            writeln!(out, "no path found: gave up after {spent} expansions")?;
        }
        _ => writeln!(out, "no path found")?,
    }
    let (expanded, created) = (result.stats.expansions, result.stats.nodes_created);
    writeln!(out, "Expanded {expanded} nodes, created {created}.")?;
    writeln!(out, "Time to compute is {:.3} s", elapsed.as_secs_f64())
}
