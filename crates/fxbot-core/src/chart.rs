//! Line-chart rendering for historical rate series.
//!
//! Rendering happens into an in-memory framebuffer and the finished PNG
//! bytes go straight to the transport, so there is no on-disk artifact to
//! clean up on any path. Text uses an embedded DejaVu Sans so the build has
//! no system-font dependency.

use std::sync::OnceLock;

use plotters::prelude::*;
use plotters::style::{register_font, FontStyle, FontTransform, IntoFont};

use image::{codecs::png::PngEncoder, ColorType, ImageEncoder};

use crate::{domain::RateSeries, errors::Error, Result};

static DEJAVU_SANS: &[u8] = include_bytes!("../assets/DejaVuSans.ttf");

fn ensure_font() -> Result<()> {
    static REGISTERED: OnceLock<std::result::Result<(), String>> = OnceLock::new();
    REGISTERED
        .get_or_init(|| {
            register_font("sans-serif", FontStyle::Normal, DEJAVU_SANS)
                .map_err(|_| "embedded font is invalid".to_string())
        })
        .clone()
        .map_err(Error::Chart)
}

/// Render a rate series as a PNG line chart: dates on x (labels rotated),
/// rate on y, titled and legended with the currency pair, grid on.
pub fn render_series_chart(series: &RateSeries, width: u32, height: u32) -> Result<Vec<u8>> {
    if series.is_empty() {
        return Err(Error::Chart("empty rate series".to_string()));
    }
    ensure_font()?;

    let labels: Vec<String> = series
        .points()
        .iter()
        .map(|p| p.date.format("%Y-%m-%d").to_string())
        .collect();
    let values: Vec<f64> = series.points().iter().map(|p| p.rate).collect();
    let (y_lo, y_hi) = value_bounds(&values);
    let pair = format!("{} → {}", series.base, series.target);

    let mut frame = vec![0u8; (width as usize) * (height as usize) * 3];
    {
        let root = BitMapBackend::with_buffer(&mut frame, (width, height)).into_drawing_area();
        root.fill(&WHITE).map_err(chart_err)?;

        let x_max = values.len().saturating_sub(1).max(1);
        let mut chart = ChartBuilder::on(&root)
            .caption(&pair, ("sans-serif", 22))
            .margin(12)
            .x_label_area_size(72)
            .y_label_area_size(60)
            .build_cartesian_2d(0..x_max, y_lo..y_hi)
            .map_err(chart_err)?;

        chart
            .configure_mesh()
            .x_labels(values.len())
            .x_label_formatter(&|idx| labels.get(*idx).cloned().unwrap_or_default())
            .x_label_style(
                ("sans-serif", 12)
                    .into_font()
                    .transform(FontTransform::Rotate90),
            )
            .y_label_formatter(&|rate| format!("{rate:.4}"))
            .draw()
            .map_err(chart_err)?;

        chart
            .draw_series(
                LineSeries::new(
                    values.iter().enumerate().map(|(idx, rate)| (idx, *rate)),
                    BLUE.stroke_width(2),
                )
                .point_size(3),
            )
            .map_err(chart_err)?
            .label(pair)
            .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 18, y)], BLUE.stroke_width(2)));

        chart
            .configure_series_labels()
            .border_style(BLACK)
            .background_style(WHITE.mix(0.8))
            .draw()
            .map_err(chart_err)?;

        root.present().map_err(chart_err)?;
    }

    let mut png = Vec::new();
    PngEncoder::new(&mut png)
        .write_image(&frame, width, height, ColorType::Rgb8)
        .map_err(|e| Error::Chart(format!("png encode failed: {e}")))?;
    Ok(png)
}

/// Y-axis bounds with padding so the line never hugs the frame; flat series
/// get a synthetic band around the value.
fn value_bounds(values: &[f64]) -> (f64, f64) {
    let mut lo = f64::INFINITY;
    let mut hi = f64::NEG_INFINITY;
    for v in values {
        lo = lo.min(*v);
        hi = hi.max(*v);
    }
    if !lo.is_finite() || !hi.is_finite() {
        return (0.0, 1.0);
    }
    let span = hi - lo;
    let pad = if span > 0.0 {
        span * 0.1
    } else {
        (hi.abs() * 0.1).max(0.1)
    };
    (lo - pad, hi + pad)
}

fn chart_err<E: std::fmt::Display>(e: E) -> Error {
    Error::Chart(e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{CurrencyCode, RatePoint, RateSeries};
    use chrono::{Duration, NaiveDate};

    fn sample_series(n: i64) -> RateSeries {
        let start = NaiveDate::from_ymd_opt(2026, 8, 1).unwrap();
        let points = (0..n)
            .map(|i| RatePoint {
                date: start + Duration::days(i),
                rate: 0.9 + i as f64 * 0.01,
            })
            .collect();
        RateSeries::from_unsorted(
            CurrencyCode::parse("USD").unwrap(),
            CurrencyCode::parse("EUR").unwrap(),
            points,
        )
    }

    #[test]
    fn renders_png_for_ten_point_series() {
        let png = render_series_chart(&sample_series(10), 640, 320).unwrap();
        assert_eq!(&png[..8], &[0x89, b'P', b'N', b'G', 0x0d, 0x0a, 0x1a, 0x0a]);
    }

    #[test]
    fn single_point_series_still_renders() {
        let png = render_series_chart(&sample_series(1), 400, 300).unwrap();
        assert!(!png.is_empty());
    }

    #[test]
    fn empty_series_is_an_error() {
        let series = RateSeries::from_unsorted(
            CurrencyCode::parse("USD").unwrap(),
            CurrencyCode::parse("EUR").unwrap(),
            Vec::new(),
        );
        assert!(matches!(
            render_series_chart(&series, 400, 300),
            Err(Error::Chart(_))
        ));
    }

    #[test]
    fn bounds_pad_around_the_series() {
        let (lo, hi) = value_bounds(&[0.9, 1.0]);
        assert!(lo < 0.9 && hi > 1.0);
    }

    #[test]
    fn bounds_widen_flat_series() {
        let (lo, hi) = value_bounds(&[0.92, 0.92]);
        assert!(lo < 0.92 && hi > 0.92);
    }
}
