// Sat Oct 17 2026 - Alex

use crate::binary::ObjectFile;
use crate::config::Config;
use crate::dwarf::{extract_units, CompileUnit};
use crate::engine::error::PipelineError;
use crate::layout::{analyze_unit, ResolvedRegistry};
use rayon::prelude::*;
use std::path::{Path, PathBuf};

/// The resolved types of one compile unit.
#[derive(Debug)]
pub struct UnitAnalysis {
    pub name: String,
    pub location: PathBuf,
    pub types: ResolvedRegistry,
}

impl UnitAnalysis {
    pub fn padded_count(&self) -> usize {
        self.types.padded_types().count()
    }

    /// Bytes lost to gaps directly inside this unit's structs.
    pub fn wasted_bytes(&self) -> u64 {
        self.types
            .padded_types()
            .flat_map(|(id, _)| self.types.padding_gaps(id))
            .fold(0u64, |total, gap| total.saturating_add(gap.size()))
    }

    /// `<unit>:<line>`, or just the unit name when the line is unknown.
    pub fn declaration(&self, decl_line: Option<u64>) -> String {
        match decl_line {
            Some(line) => format!("{}:{}", self.name, line),
            None => self.name.clone(),
        }
    }
}

/// Object file in, one analysis per compile unit out, in unit order.
///
/// Every unit is analyzed before anything is returned, so a failure in any
/// unit leaves the caller with nothing to report.
pub struct Pipeline {
    parallel: bool,
    max_threads: usize,
}

impl Pipeline {
    pub fn new() -> Self {
        Self::from_config(&Config::default())
    }

    pub fn from_config(config: &Config) -> Self {
        Self {
            parallel: config.parallel,
            max_threads: config.max_threads.max(1),
        }
    }

    pub fn run<P: AsRef<Path>>(&self, path: P) -> Result<Vec<UnitAnalysis>, PipelineError> {
        let object = ObjectFile::open(path)?;
        log::info!("Loaded {} ({} bytes)", object.path().display(), object.size());

        let sections = object.debug_sections()?;
        let units = extract_units(&sections)?;
        self.analyze(units)
    }

    pub fn analyze(&self, units: Vec<CompileUnit>) -> Result<Vec<UnitAnalysis>, PipelineError> {
        if !self.parallel || units.len() < 2 {
            return units.iter().map(analyze_one).collect();
        }

        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(self.max_threads)
            .build()
            .map_err(|e| PipelineError::ThreadPool(e.to_string()))?;
        log::debug!("Analyzing on {} threads", self.max_threads);

        pool.install(|| units.par_iter().map(analyze_one).collect())
    }
}

impl Default for Pipeline {
    fn default() -> Self {
        Self::new()
    }
}

fn analyze_one(unit: &CompileUnit) -> Result<UnitAnalysis, PipelineError> {
    let types = analyze_unit(unit).map_err(|source| PipelineError::Layout {
        unit: unit.name.clone(),
        source,
    })?;
    Ok(UnitAnalysis {
        name: unit.name.clone(),
        location: unit.location(),
        types,
    })
}
