use crate::error::Result;
use serde::Serialize;
use spiralcage::core::geometry::Convergence;
use spiralcage::core::models::graph::Graph;
use spiralcage::core::symmetry::PointGroup;
use spiralcage::engine::candidate::AcceptedCage;
use spiralcage::workflows::build::BuildResult;
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// One line of the CSV summary.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct CageRow {
    pub id: String,
    pub sequence: String,
    pub vertices: usize,
    pub edges: usize,
    pub faces: usize,
    pub point_group: Option<String>,
    pub chiral: Option<bool>,
    /// Identifier of the generated mirror image, if any.
    pub enantiomorph: Option<String>,
    pub iterations: Option<usize>,
    pub converged: Option<bool>,
}

impl CageRow {
    fn new(
        graph: &Graph,
        sequence: String,
        point_group: Option<&PointGroup>,
        enantiomorph: Option<&Graph>,
        convergence: Option<&Convergence>,
    ) -> Self {
        Self {
            id: graph.id().to_string(),
            sequence,
            vertices: graph.vertex_count(),
            edges: graph.edge_count(),
            faces: graph.face_count(),
            point_group: point_group.map(|g| g.symbol().to_string()),
            chiral: point_group.map(PointGroup::is_chiral),
            enantiomorph: enantiomorph.map(|g| g.id().to_string()),
            iterations: convergence.map(|c| c.iterations),
            converged: convergence.map(|c| c.converged),
        }
    }
}

impl From<&AcceptedCage> for CageRow {
    fn from(cage: &AcceptedCage) -> Self {
        Self::new(
            &cage.graph,
            cage.sequence.to_string(),
            cage.point_group.as_ref(),
            cage.enantiomorph.as_ref(),
            cage.convergence.as_ref(),
        )
    }
}

impl From<&BuildResult> for CageRow {
    fn from(result: &BuildResult) -> Self {
        Self::new(
            &result.graph,
            result.graph.id().to_string(),
            Some(&result.point_group),
            result.enantiomorph.as_ref(),
            result.convergence.as_ref(),
        )
    }
}

pub fn write_rows<W: Write>(writer: W, rows: &[CageRow]) -> Result<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    for row in rows {
        csv_writer.serialize(row)?;
    }
    csv_writer.flush()?;
    Ok(())
}

pub fn write_rows_to_path(path: &Path, rows: &[CageRow]) -> Result<()> {
    let file = File::create(path)?;
    write_rows(file, rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use spiralcage::engine::config::BuildConfig;
    use spiralcage::workflows::build;

    fn dodecahedron_row() -> CageRow {
        let config = BuildConfig {
            regularization: spiralcage::engine::config::RegularizationConfig {
                enabled: false,
                ..Default::default()
            },
            ..Default::default()
        };
        let result = build::run(&"555555555555".parse().unwrap(), &config).unwrap();
        CageRow::from(&result)
    }

    #[test]
    fn build_result_becomes_a_row() {
        let row = dodecahedron_row();
        assert_eq!(row.id, "555555555555");
        assert_eq!((row.vertices, row.edges, row.faces), (20, 30, 12));
        assert_eq!(row.point_group.as_deref(), Some("Ih"));
        assert_eq!(row.chiral, Some(false));
        assert_eq!(row.enantiomorph, None);
        assert_eq!(row.iterations, None);
    }

    #[test]
    fn rows_are_written_with_a_kebab_case_header() {
        let mut buffer = Vec::new();
        write_rows(&mut buffer, &[dodecahedron_row()]).unwrap();
        let text = String::from_utf8(buffer).unwrap();
        let mut lines = text.lines();
        assert_eq!(
            lines.next(),
            Some("id,sequence,vertices,edges,faces,point-group,chiral,enantiomorph,iterations,converged")
        );
        assert_eq!(lines.next(), Some("555555555555,555555555555,20,30,12,Ih,false,,,"));
        assert_eq!(lines.next(), None);
    }

    #[test]
    fn rows_can_be_written_to_a_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cages.csv");
        write_rows_to_path(&path, &[dodecahedron_row(), dodecahedron_row()]).unwrap();
        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content.lines().count(), 3);
    }
}
