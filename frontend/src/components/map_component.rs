use std::collections::HashMap;

use geo_types::Point;
use gloo_console::info;
use gloo_utils::document;
use leaflet::{
    LatLng, Map, MapOptions, Marker, MouseEvents, Popup, PopupOptions, TileLayer, TileLayerOptions,
};
use wasm_bindgen::JsCast;
use web_sys::{Element, HtmlElement, Node};
use workout_tracker_lib::workout::Workout;
use yew::prelude::*;

const DEFAULT_ZOOM: f64 = 13.0;

pub struct MapComponent {
    map: Map,
    container: HtmlElement,
    markers: HashMap<String, Marker>,
}

#[derive(PartialEq, Properties, Clone)]
pub struct Props {
    /// Initial view center (the user's geolocated position).
    pub center: Point<f64>,
    pub workouts: Vec<Workout>,
    /// Workout position to pan to, tagged with a sequence number so that
    /// repeated clicks on the same card still re-center the view.
    pub focused: Option<(u32, Point<f64>)>,
    /// Map click, reported as (lat, lng).
    pub on_click: Callback<(f64, f64)>,
}

impl MapComponent {
    fn render_map(&self) -> Html {
        let node: &Node = &self.container.clone().into();
        Html::VRef(node.clone())
    }

    /// Add a marker with a bound popup for every workout that does not
    /// have one yet. Markers are keyed by workout id and never removed.
    fn sync_markers(&mut self, workouts: &[Workout]) {
        for workout in workouts {
            if self.markers.contains_key(&workout.id) {
                continue;
            }

            let marker = Marker::new(&LatLng::new(workout.lat(), workout.lng()));
            marker.add_to(&self.map);

            let opts = PopupOptions::default();
            opts.set_max_width(300.0);
            opts.set_min_width(200.0);
            opts.set_auto_close(false);
            opts.set_close_on_click(false);
            opts.set_class_name(workout.kind().popup_class().to_string());

            let popup = Popup::new(&opts, None);
            popup.set_content(&format!("{} {}", workout.kind().icon(), workout.description).into());
            marker.bind_popup(&popup);
            marker.open_popup();

            self.markers.insert(workout.id.clone(), marker);
        }
    }
}

impl Component for MapComponent {
    type Message = ();
    type Properties = Props;

    fn create(ctx: &Context<Self>) -> Self {
        let container: Element = document().create_element("div").unwrap();
        let container: HtmlElement = container.dyn_into().unwrap();
        container.set_class_name("map");

        let leaflet_map = Map::new_with_element(&container, &MapOptions::default());

        let on_click = ctx.props().on_click.clone();
        leaflet_map.on_mouse_click(Box::new(move |event: leaflet::MouseEvent| {
            let latlng = event.lat_lng();
            on_click.emit((latlng.lat(), latlng.lng()));
        }));

        Self {
            map: leaflet_map,
            container,
            markers: HashMap::new(),
        }
    }

    fn rendered(&mut self, ctx: &Context<Self>, first_render: bool) {
        if first_render {
            let props = ctx.props();
            let center = LatLng::new(props.center.y(), props.center.x());
            self.map.set_view(&center, DEFAULT_ZOOM);
            add_tile_layer(&self.map);

            // workouts restored from storage are only drawn now, once the
            // map is actually up
            self.sync_markers(&props.workouts);
            info!(format!("Map ready with {} markers", self.markers.len()));
        }
    }

    fn changed(&mut self, ctx: &Context<Self>, old_props: &Self::Properties) -> bool {
        self.map.invalidate_size(false);
        let props = ctx.props();

        self.sync_markers(&props.workouts);

        if props.focused != old_props.focused {
            if let Some((_, position)) = props.focused {
                self.map
                    .set_view(&LatLng::new(position.y(), position.x()), DEFAULT_ZOOM);
            }
        }

        true
    }

    fn view(&self, _ctx: &Context<Self>) -> Html {
        html! {
            <div class="map">
                {self.render_map()}
            </div>
        }
    }
}

fn add_tile_layer(map: &Map) {
    let opts = TileLayerOptions::new();
    opts.set_attribution(
        r#"&copy; <a href="https://www.openstreetmap.org/copyright">OpenStreetMap</a> contributors"#
            .to_string(),
    );
    TileLayer::new_options("https://tile.openstreetmap.org/{z}/{x}/{y}.png", &opts).add_to(map);
}
