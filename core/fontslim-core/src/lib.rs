//! fontslim-core: the patient tailor of Japanese type
//!
//! Noto Sans JP ships with tens of thousands of glyphs, and a PDF renderer
//! that embeds it whole carries every one of them along for the ride. This
//! library trims the font down to the characters a document actually needs,
//! then holds the result up against a target size like a tailor checking a
//! hem.
//!
//! ## The Fitting, Step by Step
//!
//! **Measuring**: the character list decides what stays
//! - [`charset::CharSet`] reads `chars.txt` and counts distinct characters
//! - [`chargen`] rebuilds that list from kana, JIS level-1 kanji and a
//!   domain vocabulary when it needs refreshing
//!
//! **Cutting**: the heavy lifting belongs to fontTools
//! - [`subset::SubsetRequest`] carries the fixed flag set (no layout
//!   features, no hinting, desubroutinized, minimal names)
//! - [`subset::Subsetter`] is the seam; [`subset::FontToolsSubsetter`] shells
//!   out to `python -m fontTools.subset`
//!
//! **Checking the fit**: every output lands in a size band
//! - [`band::TargetBand`] sorts outputs into under, within or over target
//! - [`inspect`] peeks at the source font so missing glyphs don't go unnoticed
//!
//! ## A Sample Fitting
//!
//! ```rust,no_run
//! use std::io;
//! use fontslim_core::run::{run, SubsetPlan};
//! use fontslim_core::output::Style;
//! use fontslim_core::subset::FontToolsSubsetter;
//!
//! let plan = SubsetPlan::for_project(".".as_ref());
//! let report = run(&plan, &FontToolsSubsetter::default(), io::stdout(), Style::plain())?;
//! println!("all fonts within target: {}", report.success);
//! #
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ---
//!
//! Crafted with care at FontLab https://www.fontlab.com/

pub mod asset;
pub mod band;
pub mod chargen;
pub mod charset;
pub mod inspect;
pub mod output;
pub mod run;
pub mod subset;
pub mod tags;
