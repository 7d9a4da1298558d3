use web_sys::{HtmlInputElement, HtmlSelectElement};
use workout_tracker_lib::workout::{WorkoutEntry, WorkoutKind};
use yew::prelude::*;

#[derive(PartialEq, Properties)]
pub struct Props {
    pub visible: bool,
    pub on_submit: Callback<WorkoutEntry>,
    pub on_cancel: Callback<()>,
}

/// The entry form. Values stay put while validation fails; they are only
/// cleared when the form closes again.
#[function_component]
pub fn WorkoutForm(props: &Props) -> Html {
    let kind = use_state(|| WorkoutKind::Running);
    let distance = use_state(String::new);
    let duration = use_state(String::new);
    let cadence = use_state(String::new);
    let elevation_gain = use_state(String::new);
    let distance_ref = use_node_ref();

    {
        let distance = distance.clone();
        let duration = duration.clone();
        let cadence = cadence.clone();
        let elevation_gain = elevation_gain.clone();
        let distance_ref = distance_ref.clone();
        use_effect_with(props.visible, move |visible| {
            if *visible {
                if let Some(input) = distance_ref.cast::<HtmlInputElement>() {
                    let _ = input.focus();
                }
            } else {
                distance.set(String::new());
                duration.set(String::new());
                cadence.set(String::new());
                elevation_gain.set(String::new());
            }
        });
    }

    let on_kind_change = {
        let kind = kind.clone();
        Callback::from(move |e: Event| {
            let select: HtmlSelectElement = e.target_unchecked_into();
            kind.set(match select.value().as_str() {
                "cycling" => WorkoutKind::Cycling,
                _ => WorkoutKind::Running,
            });
        })
    };

    let field_input = |state: &UseStateHandle<String>| {
        let state = state.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            state.set(input.value());
        })
    };

    let onsubmit = {
        let on_submit = props.on_submit.clone();
        let kind = kind.clone();
        let distance = distance.clone();
        let duration = duration.clone();
        let cadence = cadence.clone();
        let elevation_gain = elevation_gain.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            on_submit.emit(WorkoutEntry {
                kind: *kind,
                distance: (*distance).clone(),
                duration: (*duration).clone(),
                cadence: (*cadence).clone(),
                elevation_gain: (*elevation_gain).clone(),
            });
        })
    };

    let onkeydown = {
        let on_cancel = props.on_cancel.clone();
        Callback::from(move |e: KeyboardEvent| {
            if e.key() == "Escape" {
                on_cancel.emit(());
            }
        })
    };

    html! {
        <form
            class={classes!("workout-form", (!props.visible).then_some("hidden"))}
            {onsubmit}
            {onkeydown}
        >
            <div class="form-row">
                <label>{ "Type" }</label>
                <select class="form-input form-input-type" onchange={on_kind_change}>
                    <option value="running" selected={*kind == WorkoutKind::Running}>{ "Running" }</option>
                    <option value="cycling" selected={*kind == WorkoutKind::Cycling}>{ "Cycling" }</option>
                </select>
            </div>
            <div class="form-row">
                <label>{ "Distance" }</label>
                <input
                    ref={distance_ref}
                    class="form-input form-input-distance"
                    placeholder="km"
                    value={(*distance).clone()}
                    oninput={field_input(&distance)}
                />
            </div>
            <div class="form-row">
                <label>{ "Duration" }</label>
                <input
                    class="form-input"
                    placeholder="min"
                    value={(*duration).clone()}
                    oninput={field_input(&duration)}
                />
            </div>
            // only one of the two kind-specific rows is ever shown
            if *kind == WorkoutKind::Running {
                <div class="form-row">
                    <label>{ "Cadence" }</label>
                    <input
                        class="form-input"
                        placeholder="steps/min"
                        value={(*cadence).clone()}
                        oninput={field_input(&cadence)}
                    />
                </div>
            } else {
                <div class="form-row">
                    <label>{ "Elev. gain" }</label>
                    <input
                        class="form-input"
                        placeholder="meters"
                        value={(*elevation_gain).clone()}
                        oninput={field_input(&elevation_gain)}
                    />
                </div>
            }
            <button type="submit" class="form-btn">{ "OK" }</button>
        </form>
    }
}
