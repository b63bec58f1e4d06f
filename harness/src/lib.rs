use std::fs::File;
use std::io::{self, Read, Write};
use std::path::Path;
use std::time::{Duration, Instant};

use matchers::{
    Positions, RkParams, SearchError, automaton_find_all, kmp_find_all, rk_find_all,
};
use memmap2::Mmap;

/// One matcher's output plus how long the whole invocation took,
/// table construction included.
#[derive(Debug, Clone)]
pub struct MatcherRun {
    pub name: &'static str,
    pub positions: Positions,
    pub elapsed: Duration,
}

impl MatcherRun {
    pub fn count(&self) -> usize {
        self.positions.len()
    }
}

/// First point where the three matchers disagree. This signals a bug
/// in one of the matchers, never a problem with the input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Divergence {
    CountMismatch {
        automaton: usize,
        kmp: usize,
        rabin_karp: usize,
    },
    PositionMismatch {
        index: usize,
        automaton: usize,
        kmp: usize,
        rabin_karp: usize,
    },
}

#[derive(Debug, Clone)]
pub struct ValidationReport {
    pub automaton: MatcherRun,
    pub kmp: MatcherRun,
    pub rabin_karp: MatcherRun,
    pub divergence: Option<Divergence>,
}

impl ValidationReport {
    pub fn is_consistent(&self) -> bool {
        self.divergence.is_none()
    }

    pub fn runs(&self) -> [&MatcherRun; 3] {
        [&self.automaton, &self.kmp, &self.rabin_karp]
    }

    /// The match count all three matchers agreed on.
    pub fn agreed_count(&self) -> Option<usize> {
        self.is_consistent().then(|| self.automaton.count())
    }
}

fn timed<F>(name: &'static str, search: F) -> Result<MatcherRun, SearchError>
where
    F: FnOnce() -> Result<Positions, SearchError>,
{
    let start = Instant::now();
    let positions = search()?;
    let elapsed = start.elapsed();

    log::debug!(
        "{name}: {} matches in {}ns",
        positions.len(),
        elapsed.as_nanos()
    );

    Ok(MatcherRun {
        name,
        positions,
        elapsed,
    })
}

/// Run all three matchers over identical input and compare results.
///
/// Divergence ends up in the report, never in an `Err`, and is never
/// silently corrected.
pub fn validate(
    text: &[u8],
    pattern: &[u8],
    rk: RkParams,
) -> Result<ValidationReport, SearchError> {
    let automaton = timed("automaton", || automaton_find_all(text, pattern))?;
    let kmp = timed("kmp", || kmp_find_all(text, pattern))?;
    let rabin_karp = timed("rk", || rk_find_all(text, pattern, rk))?;

    let divergence = compare(&automaton.positions, &kmp.positions, &rabin_karp.positions);

    Ok(ValidationReport {
        automaton,
        kmp,
        rabin_karp,
        divergence,
    })
}

/// Counts first; positions element-by-element only when counts agree.
/// All matchers scan left to right, so agreeing sequences must be
/// identical, not merely set-equal.
pub fn compare(
    automaton: &Positions,
    kmp: &Positions,
    rabin_karp: &Positions,
) -> Option<Divergence> {
    if automaton.len() != kmp.len() || automaton.len() != rabin_karp.len() {
        return Some(Divergence::CountMismatch {
            automaton: automaton.len(),
            kmp: kmp.len(),
            rabin_karp: rabin_karp.len(),
        });
    }

    let (a, k, r) = (automaton.as_slice(), kmp.as_slice(), rabin_karp.as_slice());
    for index in 0..a.len() {
        if a[index] != k[index] || a[index] != r[index] {
            return Some(Divergence::PositionMismatch {
                index,
                automaton: a[index],
                kmp: k[index],
                rabin_karp: r[index],
            });
        }
    }

    None
}

/// Render a report in the harness's line format: one timing line per
/// matcher, then agreement or divergence. Positions are printed only
/// on request and only when the matchers actually agree; a divergent
/// run has no single sequence worth calling `matches`.
pub fn write_report(
    out: &mut dyn Write,
    report: &ValidationReport,
    print_positions: bool,
) -> io::Result<()> {
    for run in report.runs() {
        writeln!(
            out,
            "{}: found {} in {}ns",
            run.name,
            run.count(),
            run.elapsed.as_nanos()
        )?;
    }

    match report.divergence {
        None => writeln!(out, "agreement: {} matches", report.automaton.count())?,
        Some(divergence) => writeln!(out, "divergence: {divergence:?}")?,
    }

    if print_positions && report.is_consistent() {
        writeln!(out, "matches: {:?}", report.automaton.positions.as_slice())?;
    }

    Ok(())
}

/// Read a whole file into an owned buffer through a transient memory
/// map. `-` reads stdin instead.
pub fn load_bytes(path: &Path) -> io::Result<Vec<u8>> {
    if path.as_os_str() == "-" {
        let mut buf = Vec::new();
        io::stdin().read_to_end(&mut buf)?;
        return Ok(buf);
    }

    let file = File::open(path)?;
    // Safety: the map lives only long enough to be copied into an
    // owned Vec; no slice into it escapes.
    let map = unsafe { Mmap::map(&file)? };
    Ok(map.to_vec())
}
