//! Subsetting driver (made by FontLab https://www.fontlab.com/)

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::asset::{Flavor, FontAsset};
use crate::band::{SizeClass, TargetBand};
use crate::charset::CharSet;
use crate::inspect::{inspect_source, SourceInfo};
use crate::output::{
    reduction_percent, write_banner, write_failure, write_font_header, write_processed,
    write_skip, write_summary, Style,
};
use crate::subset::{SubsetRequest, Subsetter};

/// Everything one run needs to know.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubsetPlan {
    pub chars_file: PathBuf,
    /// Where outputs land.
    pub fonts_dir: PathBuf,
    /// Where source fonts are looked up.
    pub originals_dir: PathBuf,
    pub fonts: Vec<FontAsset>,
    pub flavor: Flavor,
    pub band: TargetBand,
}

impl SubsetPlan {
    /// The standard project layout: `scripts/chars.txt`,
    /// `packages/assets/fonts` and its `originals` directory.
    pub fn for_project(root: &Path) -> Self {
        let fonts_dir = root.join("packages").join("assets").join("fonts");
        Self {
            chars_file: root.join("scripts").join("chars.txt"),
            originals_dir: fonts_dir.join("originals"),
            fonts_dir,
            fonts: FontAsset::noto_sans_jp(Flavor::default()),
            flavor: Flavor::default(),
            band: TargetBand::default(),
        }
    }

    /// Switch the output flavor. Default Noto Sans JP outputs are renamed to
    /// the new extension; custom font pairs are left alone.
    pub fn with_flavor(mut self, flavor: Flavor) -> Self {
        if self.fonts == FontAsset::noto_sans_jp(self.flavor) {
            self.fonts = FontAsset::noto_sans_jp(flavor);
        }
        self.flavor = flavor;
        self
    }

    pub fn with_fonts(mut self, fonts: Vec<FontAsset>) -> Self {
        self.fonts = fonts;
        self
    }

    pub fn with_band(mut self, band: TargetBand) -> Self {
        self.band = band;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcessedFont {
    pub input_bytes: u64,
    pub output_bytes: u64,
    pub reduction_percent: Option<f64>,
    pub class: SizeClass,
    #[serde(default)]
    pub source: Option<SourceInfo>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum FontOutcome {
    /// Input font absent; does not affect the run's success.
    Skipped,
    Processed(ProcessedFont),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FontReport {
    pub input: PathBuf,
    pub output: PathBuf,
    #[serde(flatten)]
    pub outcome: FontOutcome,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunReport {
    pub chars_file: PathBuf,
    pub char_count: usize,
    pub flavor: Flavor,
    pub band: TargetBand,
    pub fonts: Vec<FontReport>,
    /// False once any output exceeds the band's maximum.
    pub success: bool,
}

/// Subset every font of the plan in order, writing progress to `out`.
///
/// A missing character list or originals directory fails before anything
/// runs. A failing subsetter stops the run at that font.
pub fn run(
    plan: &SubsetPlan,
    subsetter: &dyn Subsetter,
    mut out: impl Write,
    style: Style,
) -> Result<RunReport> {
    if !plan.chars_file.exists() {
        return Err(anyhow!(
            "character list {} does not exist; create it with `fontslim generate`",
            plan.chars_file.display()
        ));
    }
    if !plan.originals_dir.exists() {
        return Err(anyhow!(
            "originals directory {} does not exist; place the source fonts there",
            plan.originals_dir.display()
        ));
    }

    let chars = CharSet::load(&plan.chars_file)?;
    if chars.is_empty() {
        warn!(path = %plan.chars_file.display(), "character list is empty");
    }
    write_banner(&mut out, &plan.chars_file, chars.len(), plan.flavor)?;

    let mut fonts = Vec::with_capacity(plan.fonts.len());
    let mut success = true;

    for asset in &plan.fonts {
        let input = plan.originals_dir.join(&asset.input);
        let output = plan.fonts_dir.join(&asset.output);

        if !input.exists() {
            info!(input = %input.display(), "source font missing, skipping");
            write_skip(&mut out, &input)?;
            fonts.push(FontReport {
                input,
                output,
                outcome: FontOutcome::Skipped,
            });
            continue;
        }

        let request = SubsetRequest {
            input,
            output,
            chars_file: plan.chars_file.clone(),
            flavor: plan.flavor,
        };
        let processed = process_font(
            &asset.name(),
            &request,
            plan,
            &chars,
            subsetter,
            &mut out,
            style,
        )?;

        if processed.class.clears_success() {
            success = false;
        }
        fonts.push(FontReport {
            input: request.input,
            output: request.output,
            outcome: FontOutcome::Processed(processed),
        });
    }

    write_summary(&mut out, success, style)?;

    Ok(RunReport {
        chars_file: plan.chars_file.clone(),
        char_count: chars.len(),
        flavor: plan.flavor,
        band: plan.band,
        fonts,
        success,
    })
}

fn process_font(
    name: &str,
    request: &SubsetRequest,
    plan: &SubsetPlan,
    chars: &CharSet,
    subsetter: &dyn Subsetter,
    mut out: impl Write,
    style: Style,
) -> Result<ProcessedFont> {
    let input_bytes = fs::metadata(&request.input)
        .with_context(|| format!("reading size of {}", request.input.display()))?
        .len();
    write_font_header(&mut out, name, input_bytes, &subsetter.describe(request))?;

    let source = match inspect_source(&request.input, chars) {
        Ok(info) => Some(info),
        Err(err) => {
            warn!(font = name, error = %format!("{err:#}"), "could not inspect source font");
            None
        }
    };

    if let Err(err) = subsetter.subset(request) {
        write_failure(&mut out, name, style)?;
        return Err(err.context(format!("subsetting {name} failed")));
    }

    let output_bytes = fs::metadata(&request.output)
        .with_context(|| {
            format!(
                "subsetter reported success but {} is missing",
                request.output.display()
            )
        })?
        .len();
    let class = plan.band.classify(output_bytes);
    info!(font = name, input_bytes, output_bytes, class = ?class, "subset complete");

    let processed = ProcessedFont {
        input_bytes,
        output_bytes,
        reduction_percent: reduction_percent(input_bytes, output_bytes),
        class,
        source,
    };
    write_processed(&mut out, &processed, &plan.band, style)?;
    Ok(processed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use tempfile::tempdir;

    struct FixedSize(u64);

    impl Subsetter for FixedSize {
        fn describe(&self, _request: &SubsetRequest) -> String {
            "fixed".to_string()
        }

        fn subset(&self, request: &SubsetRequest) -> Result<()> {
            fs::write(&request.output, vec![0u8; self.0 as usize])?;
            Ok(())
        }
    }

    struct WritesNothing;

    impl Subsetter for WritesNothing {
        fn describe(&self, _request: &SubsetRequest) -> String {
            "noop".to_string()
        }

        fn subset(&self, _request: &SubsetRequest) -> Result<()> {
            Ok(())
        }
    }

    struct Recording {
        calls: RefCell<Vec<PathBuf>>,
    }

    impl Subsetter for Recording {
        fn describe(&self, _request: &SubsetRequest) -> String {
            "recording".to_string()
        }

        fn subset(&self, request: &SubsetRequest) -> Result<()> {
            self.calls.borrow_mut().push(request.input.clone());
            Err(anyhow!("Traceback: fontTools exploded"))
        }
    }

    fn project() -> (tempfile::TempDir, SubsetPlan) {
        let tmp = tempdir().expect("tempdir");
        let plan = SubsetPlan::for_project(tmp.path());
        fs::create_dir_all(&plan.originals_dir).expect("originals");
        fs::create_dir_all(plan.chars_file.parent().unwrap()).expect("scripts");
        fs::write(&plan.chars_file, "あいうえお\nかきくけこ\n").expect("chars");
        (tmp, plan)
    }

    fn add_source(plan: &SubsetPlan, name: &str) {
        fs::write(plan.originals_dir.join(name), vec![1u8; 4096]).expect("source font");
    }

    #[test]
    fn both_fonts_within_band_is_success() {
        let (_tmp, plan) = project();
        add_source(&plan, "NotoSansJP-Regular.ttf");
        add_source(&plan, "NotoSansJP-Bold.ttf");

        let mut out = Vec::new();
        let report = run(&plan, &FixedSize(600 * 1024), &mut out, Style::plain()).expect("run");

        assert!(report.success);
        assert_eq!(report.char_count, 10);
        assert_eq!(report.fonts.len(), 2);
        assert!(plan.fonts_dir.join("NotoSansJP-Bold.woff").exists());
        for font in &report.fonts {
            match &font.outcome {
                FontOutcome::Processed(p) => {
                    assert_eq!(p.class, SizeClass::WithinRange);
                    assert!(p.source.is_none(), "dummy bytes are not a font");
                }
                FontOutcome::Skipped => panic!("nothing should be skipped"),
            }
        }

        let text = String::from_utf8(out).expect("utf8");
        assert!(text.contains("Characters: 10"));
        assert!(text.contains("All fonts are within the target size"));
    }

    #[test]
    fn missing_source_is_skipped() {
        let (_tmp, plan) = project();
        add_source(&plan, "NotoSansJP-Bold.ttf");

        let mut out = Vec::new();
        let report = run(&plan, &FixedSize(650 * 1024), &mut out, Style::plain()).expect("run");

        assert!(report.success);
        assert_eq!(report.fonts[0].outcome, FontOutcome::Skipped);
        assert!(matches!(report.fonts[1].outcome, FontOutcome::Processed(_)));
        assert!(String::from_utf8(out).unwrap().contains("Skipped:"));
    }

    #[test]
    fn oversize_output_clears_success() {
        let (_tmp, plan) = project();
        add_source(&plan, "NotoSansJP-Regular.ttf");

        let mut out = Vec::new();
        let report = run(&plan, &FixedSize(701 * 1024), &mut out, Style::plain()).expect("run");

        assert!(!report.success);
        let text = String::from_utf8(out).expect("utf8");
        assert!(text.contains("Completed with warnings"));
        assert!(text.contains("Size reduction hints:"));
    }

    #[test]
    fn undersize_output_keeps_success() {
        let (_tmp, plan) = project();
        add_source(&plan, "NotoSansJP-Regular.ttf");

        let report = run(&plan, &FixedSize(499 * 1024), Vec::new(), Style::plain()).expect("run");

        assert!(report.success);
        match &report.fonts[0].outcome {
            FontOutcome::Processed(p) => assert_eq!(p.class, SizeClass::BelowMinimum),
            FontOutcome::Skipped => panic!("regular should be processed"),
        }
    }

    #[test]
    fn failure_halts_before_next_font() {
        let (_tmp, plan) = project();
        add_source(&plan, "NotoSansJP-Regular.ttf");
        add_source(&plan, "NotoSansJP-Bold.ttf");
        let subsetter = Recording {
            calls: RefCell::new(Vec::new()),
        };

        let mut out = Vec::new();
        let err = run(&plan, &subsetter, &mut out, Style::plain()).unwrap_err();

        assert_eq!(subsetter.calls.borrow().len(), 1);
        assert!(format!("{err:#}").contains("NotoSansJP-Regular.ttf"));
        assert!(format!("{err:#}").contains("fontTools exploded"));
        let text = String::from_utf8(out).expect("utf8");
        assert!(text.contains("Failed: subsetting NotoSansJP-Regular.ttf failed"));
        assert!(
            !text.contains("fontTools exploded"),
            "diagnostics belong to the error, not the progress text"
        );
        assert!(!text.contains("NotoSansJP-Bold"));
    }

    #[test]
    fn flavor_renames_default_outputs() {
        let plan = SubsetPlan::for_project(Path::new("/p")).with_flavor(Flavor::Woff2);
        assert_eq!(plan.flavor, Flavor::Woff2);
        assert_eq!(
            plan.fonts[0].output,
            PathBuf::from("NotoSansJP-Regular.woff2")
        );

        let back = plan.with_flavor(Flavor::Ttf);
        assert_eq!(back.fonts, FontAsset::noto_sans_jp(Flavor::Ttf));
    }

    #[test]
    fn flavor_keeps_custom_font_pairs() {
        let custom = vec![FontAsset::new("Mono.otf", "mono-subset.woff")];
        let plan = SubsetPlan::for_project(Path::new("/p"))
            .with_fonts(custom.clone())
            .with_flavor(Flavor::Woff2);
        assert_eq!(plan.fonts, custom);
    }

    #[test]
    fn missing_output_is_fatal() {
        let (_tmp, plan) = project();
        add_source(&plan, "NotoSansJP-Regular.ttf");

        let err = run(&plan, &WritesNothing, Vec::new(), Style::plain()).unwrap_err();
        assert!(err.to_string().contains("is missing"));
    }

    #[test]
    fn missing_chars_file_is_fatal() {
        let (_tmp, plan) = project();
        fs::remove_file(&plan.chars_file).expect("rm chars");

        let mut out = Vec::new();
        let err = run(&plan, &FixedSize(1), &mut out, Style::plain()).unwrap_err();
        assert!(err.to_string().contains("character list"));
        assert!(out.is_empty(), "nothing is processed before the check");
    }

    #[test]
    fn missing_originals_dir_is_fatal() {
        let (_tmp, plan) = project();
        fs::remove_dir_all(&plan.originals_dir).expect("rm originals");

        let err = run(&plan, &FixedSize(1), Vec::new(), Style::plain()).unwrap_err();
        assert!(err.to_string().contains("originals directory"));
    }

    #[test]
    fn report_serializes_status_inline() {
        let (_tmp, plan) = project();
        add_source(&plan, "NotoSansJP-Bold.ttf");

        let report = run(&plan, &FixedSize(600 * 1024), Vec::new(), Style::plain()).expect("run");
        let json = serde_json::to_value(&report).expect("json");

        assert_eq!(json["fonts"][0]["status"], "skipped");
        assert_eq!(json["fonts"][1]["status"], "processed");
        assert_eq!(json["fonts"][1]["class"], "within_range");
        assert_eq!(json["flavor"], "woff");
        assert_eq!(json["band"]["max_kb"], 700);
    }
}
