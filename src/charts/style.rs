//! Layout presets shared by every chart.

use super::figure::{Axis, AxisTitle, Font, Layout, Legend, Title};

pub const BACKGROUND: &str = "#f7f5f6";
pub const TEMPLATE: &str = "simple_white";
pub const TREND_COLOR: &str = "#258c03";
pub const HIGHLIGHT_COLOR: &str = "green";
pub const PEER_COLOR: &str = "lightgray";
pub const COUNTRY_NAME_COLOR: &str = "#34ce00";
pub const TICK_COLOR: &str = "#16350a";

pub const WIDTH: u32 = 900;
pub const HEIGHT: u32 = 500;

/// Region colors, assigned in order of first appearance
pub const PALETTE: [&str; 10] = [
    "#636efa", "#EF553B", "#00cc96", "#ab63fa", "#FFA15A", "#19d3f3", "#FF6692", "#B6E880",
    "#FF97FF", "#FECB52",
];

pub fn palette_color(index: usize) -> &'static str {
    PALETTE[index % PALETTE.len()]
}

/// Standard preset: white template, light background, 900×500, centered title.
pub fn standard_layout() -> Layout {
    Layout {
        template: Some(TEMPLATE.to_string()),
        paper_bgcolor: Some(BACKGROUND.to_string()),
        plot_bgcolor: Some(BACKGROUND.to_string()),
        autosize: Some(true),
        width: Some(WIDTH),
        height: Some(HEIGHT),
        title: Some(Title {
            text: None,
            x: Some(0.5),
            y: Some(0.95),
            xanchor: Some("center".to_string()),
            yanchor: Some("top".to_string()),
            font: None,
        }),
        ..Default::default()
    }
}

/// Standard layout with an explicit title.
pub fn titled_layout(title: impl Into<String>) -> Layout {
    let mut layout = standard_layout();
    layout.set_title(title);
    layout
}

/// Country preset: the metric name plus the country highlighted in green,
/// larger fonts on both axes.
pub fn country_layout(metric: &str, country: &str, x_title: &str, y_title: &str) -> Layout {
    let mut layout = standard_layout();
    if let Some(title) = layout.title.as_mut() {
        title.text = Some(format!(
            "Evolução {}: <span style='color: {}'>{}</span>",
            metric, COUNTRY_NAME_COLOR, country
        ));
        title.font = Some(Font::sized(24));
    }
    layout.xaxis = Some(country_axis(x_title));
    layout.yaxis = Some(country_axis(y_title));
    layout
}

fn country_axis(title: &str) -> Axis {
    Axis {
        title: Some(AxisTitle {
            text: Some(title.to_string()),
            font: Some(Font::sized(20)),
        }),
        tickfont: Some(Font {
            size: Some(18),
            color: Some(TICK_COLOR.to_string()),
        }),
    }
}

/// Legend pinned to the top-left corner
pub fn top_left_legend() -> Legend {
    Legend {
        x: 0.0,
        y: 1.0,
        xanchor: "left".to_string(),
        yanchor: "top".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_layout() {
        let layout = standard_layout();
        assert_eq!(layout.template.as_deref(), Some("simple_white"));
        assert_eq!(layout.paper_bgcolor.as_deref(), Some(BACKGROUND));
        assert_eq!(layout.width, Some(900));
        assert_eq!(layout.height, Some(500));
        assert_eq!(layout.title.unwrap().xanchor.as_deref(), Some("center"));
    }

    #[test]
    fn test_country_layout() {
        let layout = country_layout("do IDH", "Brazil", "Ano", "IDH");
        let title = layout.title.as_ref().unwrap();

        assert_eq!(
            title.text.as_deref(),
            Some("Evolução do IDH: <span style='color: #34ce00'>Brazil</span>")
        );
        assert_eq!(title.font.as_ref().unwrap().size, Some(24));

        let yaxis = layout.yaxis.as_ref().unwrap();
        assert_eq!(yaxis.title_text(), Some("IDH"));
        assert_eq!(yaxis.tickfont.as_ref().unwrap().color.as_deref(), Some(TICK_COLOR));
    }

    #[test]
    fn test_palette_wraps() {
        assert_eq!(palette_color(0), palette_color(PALETTE.len()));
    }
}
