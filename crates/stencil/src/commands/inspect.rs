use anyhow::Context as _;
use anyhow::Result;
use clap::Parser;
use serde::Serialize;
use stencil_project::ProjectItem;

use crate::commands::Command;
use crate::commands::Context;
use crate::exit::Exit;

#[derive(Debug, Parser)]
pub struct Inspect {
    /// Logical paths such as `/Views/Home/Index.cshtml`.
    #[arg(required = true)]
    paths: Vec<String>,

    /// Print a JSON array instead of text.
    #[arg(long)]
    json: bool,
}

#[derive(Debug, Serialize)]
struct ItemReport {
    path: String,
    base_path: String,
    exists: bool,
    physical_path: Option<String>,
    relative_physical_path: Option<String>,
}

impl ItemReport {
    fn from_item(item: &dyn ProjectItem) -> Self {
        Self {
            path: item.file_path().to_string(),
            base_path: item.base_path().to_string(),
            exists: item.exists(),
            physical_path: item.physical_path().map(ToString::to_string),
            relative_physical_path: item.relative_physical_path().map(ToString::to_string),
        }
    }

    fn render(&self) -> String {
        let absent = "-";
        format!(
            "{}\n  exists: {}\n  physical: {}\n  relative: {}",
            self.path,
            self.exists,
            self.physical_path.as_deref().unwrap_or(absent),
            self.relative_physical_path.as_deref().unwrap_or(absent),
        )
    }
}

impl Command for Inspect {
    fn execute(&self, context: &Context) -> Result<Exit> {
        let mut reports = Vec::with_capacity(self.paths.len());
        for path in &self.paths {
            let item = context
                .project
                .get_item(path)
                .with_context(|| format!("Failed to resolve '{path}'"))?;
            reports.push(ItemReport::from_item(&item));
        }

        if self.json {
            println!("{}", serde_json::to_string_pretty(&reports)?);
        } else {
            for report in &reports {
                println!("{}", report.render());
            }
        }

        Ok(Exit::success())
    }
}

#[cfg(test)]
mod tests {
    use stencil_project::MemoryProjectItem;
    use stencil_project::NotFoundProjectItem;

    use super::*;

    #[test]
    fn test_render_missing_item() {
        let report = ItemReport::from_item(&NotFoundProjectItem::new("/", "/missing.cshtml"));
        assert_eq!(
            report.render(),
            "/missing.cshtml\n  exists: false\n  physical: -\n  relative: -"
        );
    }

    #[test]
    fn test_report_memory_item() {
        let item = MemoryProjectItem::new("/", "/Views/x.cshtml", Vec::<u8>::new()).with_separator('/');
        let report = ItemReport::from_item(&item);
        assert!(report.exists);
        assert_eq!(report.physical_path, None);
        assert_eq!(report.relative_physical_path.as_deref(), Some("Views/x.cshtml"));
    }

    #[test]
    fn test_json_shape() {
        let report = ItemReport::from_item(&NotFoundProjectItem::new("/", "/a.cshtml"));
        let value = serde_json::to_value(&report).unwrap();
        assert_eq!(value["path"], "/a.cshtml");
        assert_eq!(value["exists"], false);
        assert!(value["physical_path"].is_null());
    }
}
