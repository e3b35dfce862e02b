//! World map centered on the selected city
//!
//! Depends only on the map view (selection + registry), never on the fetch,
//! so it keeps working when the API is down.

use ratatui::{
    layout::Rect,
    style::{Style, Stylize},
    symbols::Marker,
    text::Line,
    widgets::{
        canvas::{Canvas, Map, MapResolution, Points},
        Block, BorderType, Borders, Paragraph,
    },
    Frame,
};

use daylight_core::MapView;

use tui_dispatch::{Component, EventKind};

use crate::action::Action;
use crate::state::Palette;

pub struct CityMap;

pub struct CityMapProps<'a> {
    pub map: Option<MapView>,
    pub city: &'a str,
    pub palette: Palette,
}

impl Component for CityMap {
    type Props<'a> = CityMapProps<'a>;

    #[allow(refining_impl_trait)]
    fn handle_event(&mut self, _event: &EventKind, _props: Self::Props<'_>) -> Vec<Action> {
        vec![]
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let palette = props.palette;
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(palette.border))
            .title(" Map ")
            .title_style(Style::default().fg(palette.accent).bold());

        let Some(map) = props.map else {
            let missing = Line::styled(
                format!("no coordinates for {}", props.city),
                Style::default().fg(palette.error),
            )
            .centered();
            frame.render_widget(Paragraph::new(missing).block(block), area);
            return;
        };

        let center = (map.center.lng, map.center.lat);
        let label = format!(
            "{} ({:.4}, {:.4}) z{}",
            props.city, map.center.lat, map.center.lng, map.zoom
        );
        let canvas = Canvas::default()
            .block(block.title_bottom(Line::from(label).centered()))
            .marker(Marker::Braille)
            .x_bounds(map.x_bounds())
            .y_bounds(map.y_bounds())
            .paint(|ctx| {
                ctx.draw(&Map {
                    color: palette.land,
                    resolution: MapResolution::High,
                });
                ctx.layer();
                ctx.draw(&Points {
                    coords: &[center],
                    color: palette.accent,
                });
                ctx.print(center.0, center.1, Line::from("●").fg(palette.accent));
            });
        frame.render_widget(canvas, area);
    }
}
