use components::{map_component::MapComponent, panel::Panel};
use geo_types::Point;
use gloo_console::{error, info};
use gloo_utils::window;
use storage::BrowserStorage;
use wasm_bindgen::{JsCast, closure::Closure};
use web_sys::{Position, PositionError};
use workout_tracker_lib::session::Session;
use workout_tracker_lib::workout::{Workout, WorkoutEntry};
use yew::prelude::*;

mod components;
mod storage;

pub enum MainMsg {
    /// Geolocation resolved (lat, lng).
    Located(f64, f64),
    LocateFailed,
    /// Map click (lat, lng) — opens the entry form.
    MapClicked(f64, f64),
    EntrySubmitted(WorkoutEntry),
    EntryCancelled,
    WorkoutSelected(String),
    ResetRequested,
}

struct Model {
    session: Session<BrowserStorage>,
    map_center: Option<Point<f64>>,
    geo_failed: bool,
    /// Sequence number forces a re-pan even when the same workout is
    /// clicked twice in a row.
    focused: Option<(u32, Point<f64>)>,
    focus_seq: u32,
}

impl Component for Model {
    type Message = MainMsg;
    type Properties = ();

    fn create(ctx: &Context<Self>) -> Self {
        let session = Session::start(BrowserStorage);
        info!(format!("Restored {} workouts", session.workouts().len()));

        request_position(ctx);

        Self {
            session,
            map_center: None,
            geo_failed: false,
            focused: None,
            focus_seq: 0,
        }
    }

    fn update(&mut self, _ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            MainMsg::Located(lat, lng) => {
                info!(format!("Located at {lat}, {lng}"));
                self.map_center = Some(Point::new(lng, lat));
                true
            }
            MainMsg::LocateFailed => {
                error!("Geolocation unavailable");
                alert("Could not get your position!");
                self.geo_failed = true;
                true
            }
            MainMsg::MapClicked(lat, lng) => {
                self.session.pick_location(Point::new(lng, lat));
                true
            }
            MainMsg::EntrySubmitted(entry) => match self.session.submit(&entry) {
                Ok(()) => true,
                Err(err) => {
                    alert(&err.to_string());
                    false
                }
            },
            MainMsg::EntryCancelled => {
                self.session.cancel_entry();
                true
            }
            MainMsg::WorkoutSelected(id) => match self.session.focus_workout(&id) {
                Some(position) => {
                    self.focus_seq += 1;
                    self.focused = Some((self.focus_seq, position));
                    true
                }
                None => false,
            },
            MainMsg::ResetRequested => {
                self.session.reset();
                let _ = window().location().reload();
                false
            }
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let link = ctx.link();
        let workouts: Vec<Workout> = self.session.workouts().to_vec();

        html! { <>
            <Panel
                workouts={workouts.clone()}
                entry_open={self.session.entry_open()}
                on_submit={link.callback(MainMsg::EntrySubmitted)}
                on_cancel={link.callback(|()| MainMsg::EntryCancelled)}
                on_select={link.callback(MainMsg::WorkoutSelected)}
                on_reset={link.callback(|()| MainMsg::ResetRequested)}
            />
            if let Some(center) = self.map_center {
                <MapComponent
                    center={center}
                    workouts={workouts}
                    focused={self.focused}
                    on_click={link.callback(|(lat, lng): (f64, f64)| MainMsg::MapClicked(lat, lng))}
                />
            } else {
                <div class="map map-placeholder">
                    { if self.geo_failed { "Map unavailable without your position" } else { "Locating…" } }
                </div>
            }
        </> }
    }
}

fn alert(message: &str) {
    let _ = window().alert_with_message(message);
}

/// Ask the browser for the current position once. Both callbacks report
/// back to the root component; denial is the only failure path.
fn request_position(ctx: &Context<Model>) {
    let located = ctx
        .link()
        .callback(|(lat, lng): (f64, f64)| MainMsg::Located(lat, lng));
    let failed = ctx.link().callback(|()| MainMsg::LocateFailed);

    let Ok(geolocation) = window().navigator().geolocation() else {
        failed.emit(());
        return;
    };

    let on_position = Closure::<dyn FnMut(Position)>::new(move |position: Position| {
        let coords = position.coords();
        located.emit((coords.latitude(), coords.longitude()));
    });
    let on_error = {
        let failed = failed.clone();
        Closure::<dyn FnMut(PositionError)>::new(move |_: PositionError| failed.emit(()))
    };

    if geolocation
        .get_current_position_with_error_callback(
            on_position.as_ref().unchecked_ref(),
            Some(on_error.as_ref().unchecked_ref()),
        )
        .is_err()
    {
        failed.emit(());
        return;
    }

    // the callbacks must stay alive for the browser to call them
    on_position.forget();
    on_error.forget();
}

fn main() {
    yew::Renderer::<Model>::new().render();
}
