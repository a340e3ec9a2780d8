use crate::error::AnalyzerError;
use crate::parser::StatSample;
use std::path::Path;

pub const HISTOGRAM_BINS: usize = 20;

#[derive(Debug, Clone, PartialEq)]
pub struct HistogramBin {
    pub start: f64,
    pub end: f64,
    pub count: usize,
}

/// Equal-width bins over `[min, max]`, last bin closed on the right.
///
/// A degenerate range is widened to `[v - 0.5, v + 0.5]` so a constant
/// series still lands in a single bin. Non-finite values are dropped.
pub fn histogram(values: &[f64], bins: usize) -> Vec<HistogramBin> {
    let finite: Vec<f64> = values.iter().copied().filter(|v| v.is_finite()).collect();
    if bins == 0 || finite.is_empty() {
        return Vec::new();
    }
    let mut lo = finite.iter().copied().fold(f64::INFINITY, f64::min);
    let mut hi = finite.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    if hi <= lo {
        lo -= 0.5;
        hi += 0.5;
    }
    let width = (hi - lo) / bins as f64;
    let mut out: Vec<HistogramBin> = (0..bins)
        .map(|i| HistogramBin {
            start: lo + width * i as f64,
            end: if i + 1 == bins { hi } else { lo + width * (i + 1) as f64 },
            count: 0,
        })
        .collect();
    for v in finite {
        let idx = (((v - lo) / width).floor() as usize).min(bins - 1);
        out[idx].count += 1;
    }
    out
}

/// Keys per second per core; samples reporting zero cores contribute 0.
pub fn core_efficiency(samples: &[StatSample]) -> Vec<f64> {
    samples
        .iter()
        .map(|s| if s.cores == 0 { 0.0 } else { s.avg_speed / s.cores as f64 })
        .collect()
}

/// Render the 2x2 performance dashboard. Returns `Ok(false)` without
/// touching `path` when there is nothing to plot.
pub fn render_performance_chart(samples: &[StatSample], path: &Path) -> Result<bool, AnalyzerError> {
    if samples.is_empty() {
        log::warn!("no samples to plot; skipping chart");
        return Ok(false);
    }
    draw::render(samples, path)?;
    log::info!("performance chart saved to {}", path.display());
    Ok(true)
}

#[cfg(not(feature = "charts"))]
mod draw {
    use super::*;

    pub(super) fn render(_samples: &[StatSample], _path: &Path) -> Result<(), AnalyzerError> {
        Err(AnalyzerError::ChartingUnavailable)
    }
}

#[cfg(feature = "charts")]
mod draw {
    use super::*;
    use plotters::coord::cartesian::Cartesian2d;
    use plotters::coord::types::RangedCoordf64;
    use plotters::coord::Shift;
    use plotters::prelude::*;
    use std::ops::Range;

    type Panel<'a> = DrawingArea<BitMapBackend<'a>, Shift>;
    type Chart<'a, 'b> = ChartContext<'a, BitMapBackend<'b>, Cartesian2d<RangedCoordf64, RangedCoordf64>>;

    const PURPLE: RGBColor = RGBColor(128, 0, 128);
    const ORANGE: RGBColor = RGBColor(255, 165, 0);

    /// Text needs a font backend; without `chart-labels` nothing may reach
    /// plotters' text path, which panics when no font is compiled in.
    const LABELS: bool = cfg!(feature = "chart-labels");

    struct Titles<'s> {
        caption: &'s str,
        x_desc: &'s str,
        y_desc: &'s str,
    }

    fn chart_err<E: std::fmt::Display>(e: E) -> AnalyzerError {
        AnalyzerError::Chart(e.to_string())
    }

    fn sample_axis(n: usize) -> Range<f64> {
        0.0..(n.max(2) - 1) as f64
    }

    fn padded(values: impl Iterator<Item = f64>) -> Range<f64> {
        let (lo, hi) = values.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
            (lo.min(v), hi.max(v))
        });
        if !lo.is_finite() || !hi.is_finite() {
            return 0.0..1.0;
        }
        if hi <= lo {
            return (lo - 1.0)..(hi + 1.0);
        }
        let pad = (hi - lo) * 0.05;
        (lo - pad)..(hi + pad)
    }

    fn indexed(values: impl Iterator<Item = f64>) -> Vec<(f64, f64)> {
        values.enumerate().map(|(i, v)| (i as f64, v)).collect()
    }

    /// Build a panel with its mesh drawn. Without a font backend the label
    /// areas are left out, so plotters skips tick labels and axis text.
    fn panel<'a, 'b>(
        area: &'a Panel<'b>,
        titles: Titles<'_>,
        x: Range<f64>,
        y: Range<f64>,
    ) -> Result<Chart<'a, 'b>, AnalyzerError> {
        let mut builder = ChartBuilder::on(area);
        builder.margin(10);
        if LABELS {
            builder
                .caption(titles.caption, ("sans-serif", 22))
                .x_label_area_size(35)
                .y_label_area_size(80);
        }
        let mut chart = builder.build_cartesian_2d(x, y).map_err(chart_err)?;
        {
            let mut mesh = chart.configure_mesh();
            if LABELS {
                mesh.x_desc(titles.x_desc).y_desc(titles.y_desc);
            }
            mesh.draw().map_err(chart_err)?;
        }
        Ok(chart)
    }

    pub(super) fn render(samples: &[StatSample], path: &Path) -> Result<(), AnalyzerError> {
        let root = BitMapBackend::new(path, (1600, 1000)).into_drawing_area();
        root.fill(&WHITE).map_err(chart_err)?;
        let panels = root.split_evenly((2, 2));
        speed_panel(&panels[0], samples)?;
        cumulative_panel(&panels[1], samples)?;
        histogram_panel(&panels[2], samples)?;
        efficiency_panel(&panels[3], samples)?;
        root.present().map_err(chart_err)?;
        Ok(())
    }

    fn speed_panel(area: &Panel<'_>, samples: &[StatSample]) -> Result<(), AnalyzerError> {
        let avg = indexed(samples.iter().map(|s| s.avg_speed));
        let instant = indexed(samples.iter().map(|s| s.instant_speed));
        let y = padded(avg.iter().chain(instant.iter()).map(|p| p.1));
        let titles = Titles { caption: "Search Speed", x_desc: "Sample", y_desc: "Keys/second" };
        let mut chart = panel(area, titles, sample_axis(samples.len()), y)?;
        chart
            .draw_series(LineSeries::new(avg, &BLUE))
            .map_err(chart_err)?
            .label("Mean speed")
            .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], BLUE));
        chart
            .draw_series(LineSeries::new(instant, RED.mix(0.7)))
            .map_err(chart_err)?
            .label("Instant speed")
            .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], RED.mix(0.7)));
        if LABELS {
            chart
                .configure_series_labels()
                .background_style(WHITE.mix(0.8))
                .border_style(BLACK)
                .draw()
                .map_err(chart_err)?;
        }
        Ok(())
    }

    fn cumulative_panel(area: &Panel<'_>, samples: &[StatSample]) -> Result<(), AnalyzerError> {
        let totals = indexed(samples.iter().map(|s| s.total_keys as f64));
        let y = padded(totals.iter().map(|p| p.1));
        let titles = Titles { caption: "Keys Tested (Cumulative)", x_desc: "Sample", y_desc: "Keys" };
        let mut chart = panel(area, titles, sample_axis(samples.len()), y)?;
        chart
            .draw_series(LineSeries::new(totals, &GREEN))
            .map_err(chart_err)?;
        Ok(())
    }

    fn histogram_panel(area: &Panel<'_>, samples: &[StatSample]) -> Result<(), AnalyzerError> {
        let speeds: Vec<f64> = samples.iter().map(|s| s.avg_speed).collect();
        let bins = histogram(&speeds, HISTOGRAM_BINS);
        let (Some(first), Some(last)) = (bins.first(), bins.last()) else {
            return Ok(());
        };
        let peak = bins.iter().map(|b| b.count).max().unwrap_or(0);
        let titles = Titles { caption: "Speed Distribution", x_desc: "Keys/second", y_desc: "Frequency" };
        let mut chart = panel(area, titles, first.start..last.end, 0.0..(peak + 1) as f64)?;
        chart
            .draw_series(bins.iter().map(|b| {
                Rectangle::new([(b.start, 0.0), (b.end, b.count as f64)], PURPLE.mix(0.7).filled())
            }))
            .map_err(chart_err)?;
        Ok(())
    }

    fn efficiency_panel(area: &Panel<'_>, samples: &[StatSample]) -> Result<(), AnalyzerError> {
        let efficiency = indexed(core_efficiency(samples).into_iter());
        let y = padded(efficiency.iter().map(|p| p.1));
        let titles = Titles { caption: "Per-Core Efficiency", x_desc: "Sample", y_desc: "Keys/second/core" };
        let mut chart = panel(area, titles, sample_axis(samples.len()), y)?;
        chart
            .draw_series(LineSeries::new(efficiency, &ORANGE))
            .map_err(chart_err)?;
        Ok(())
    }
}
