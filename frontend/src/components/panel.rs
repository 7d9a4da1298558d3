use workout_tracker_lib::workout::{Workout, WorkoutDetails, WorkoutEntry};
use yew::prelude::*;

use crate::components::workout_form::WorkoutForm;

pub struct Panel;

#[derive(PartialEq, Properties, Clone)]
pub struct Props {
    pub workouts: Vec<Workout>,
    pub entry_open: bool,
    pub on_submit: Callback<WorkoutEntry>,
    pub on_cancel: Callback<()>,
    /// Clicked workout id.
    pub on_select: Callback<String>,
    pub on_reset: Callback<()>,
}

impl Panel {
    fn workout_card(&self, ctx: &Context<Self>, workout: &Workout) -> Html {
        let id = workout.id.clone();
        let on_select = ctx.props().on_select.clone();
        let onclick = Callback::from(move |_| on_select.emit(id.clone()));

        // the derived metric and the raw metric, with their display units
        let (derived, derived_unit, raw_icon, raw, raw_unit) = match workout.details {
            WorkoutDetails::Running { cadence, pace } => {
                (pace, "min/km", "👟⏱", cadence, "spm")
            }
            WorkoutDetails::Cycling { elevation_gain, speed } => {
                (speed, "km/h", "🏔", elevation_gain, "m")
            }
        };

        html! {
            <li class={classes!("workout", format!("workout--{}", workout.kind().slug()))} {onclick}>
                <h2 class="workout-title">{ &workout.description }</h2>
                <div class="workout-details">
                    <span class="workout-icon">{ workout.kind().icon() }</span>
                    <span class="workout-value">{ workout.distance_km }</span>
                    <span class="workout-unit">{ "km" }</span>
                </div>
                <div class="workout-details">
                    <span class="workout-icon">{ "⏱" }</span>
                    <span class="workout-value">{ workout.duration_min }</span>
                    <span class="workout-unit">{ "min" }</span>
                </div>
                <div class="workout-details">
                    <span class="workout-icon">{ "📏⏱" }</span>
                    <span class="workout-value">{ format!("{derived:.2}") }</span>
                    <span class="workout-unit">{ derived_unit }</span>
                </div>
                <div class="workout-details">
                    <span class="workout-icon">{ raw_icon }</span>
                    <span class="workout-value">{ raw }</span>
                    <span class="workout-unit">{ raw_unit }</span>
                </div>
            </li>
        }
    }
}

impl Component for Panel {
    type Message = ();
    type Properties = Props;

    fn create(_ctx: &Context<Self>) -> Self {
        Panel
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let props = ctx.props();

        let on_reset = props.on_reset.clone();
        let reset_click = Callback::from(move |_| on_reset.emit(()));

        html! {
            <div class="sidebar component-container">
                <h1>{ "Workout diary" }</h1>
                <WorkoutForm
                    visible={props.entry_open}
                    on_submit={props.on_submit.clone()}
                    on_cancel={props.on_cancel.clone()}
                />
                <ul class="workouts">
                    // newest entries first
                    { for props.workouts.iter().rev().map(|workout| self.workout_card(ctx, workout)) }
                </ul>
                <div class="bottom-panel">
                    if !props.workouts.is_empty() {
                        <button class="reset-btn" onclick={reset_click}>{ "Clear all workouts" }</button>
                    }
                </div>
            </div>
        }
    }
}
