// Sat Oct 17 2026 - Alex

use crate::engine::UnitAnalysis;
use crate::layout::PaddingGap;
use crate::output::error::ReportError;
use crate::output::Reporter;
use serde::Serialize;
use std::io::Write;

#[derive(Debug, Serialize)]
pub struct UnitReport {
    pub name: String,
    pub location: String,
    pub types: Vec<TypeReport>,
}

#[derive(Debug, Serialize)]
pub struct TypeReport {
    pub offset: u64,
    pub description: String,
    pub byte_size: u64,
    pub has_padding: bool,
    pub decl_line: Option<u64>,
    pub gaps: Vec<PaddingGap>,
}

pub struct JsonReporter {
    pretty_print: bool,
    padded_only: bool,
}

impl JsonReporter {
    pub fn new() -> Self {
        Self {
            pretty_print: true,
            padded_only: false,
        }
    }

    pub fn with_pretty_print(mut self, pretty: bool) -> Self {
        self.pretty_print = pretty;
        self
    }

    pub fn with_padded_only(mut self, padded_only: bool) -> Self {
        self.padded_only = padded_only;
        self
    }

    pub fn build(&self, analyses: &[UnitAnalysis]) -> Vec<UnitReport> {
        analyses.iter().map(|analysis| self.unit_report(analysis)).collect()
    }

    fn unit_report(&self, analysis: &UnitAnalysis) -> UnitReport {
        let types = analysis
            .types
            .iter()
            .filter(|(id, _)| !self.padded_only || analysis.types.has_padding(*id))
            .map(|(id, ty)| TypeReport {
                offset: ty.offset,
                description: analysis.types.describe(id),
                byte_size: ty.byte_size,
                has_padding: analysis.types.has_padding(id),
                decl_line: ty.decl_line,
                gaps: analysis.types.padding_gaps(id),
            })
            .collect();

        UnitReport {
            name: analysis.name.clone(),
            location: analysis.location.display().to_string(),
            types,
        }
    }
}

impl Default for JsonReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl Reporter for JsonReporter {
    fn write_report(&self, out: &mut dyn Write, analyses: &[UnitAnalysis]) -> Result<(), ReportError> {
        let reports = self.build(analyses);
        if self.pretty_print {
            serde_json::to_writer_pretty(&mut *out, &reports)?;
        } else {
            serde_json::to_writer(&mut *out, &reports)?;
        }
        writeln!(out)?;
        Ok(())
    }
}
