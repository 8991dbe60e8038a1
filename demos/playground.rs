//! Counter, input-sync and todo-list widgets, mounted into an auto-created
//! host element. Components are plain functions returning an [`Element`].

use nami::{Binding, Signal, SignalExt, binding};
use rivulet::{App, Element, IntoElement, RenderError, Value, dynamic, el, text};
use wasm_bindgen::JsCast;
use web_sys::HtmlInputElement;

fn counter() -> Element {
    let count: Binding<i32> = binding(0);

    let adjust = |count: &Binding<i32>, delta: i32| {
        let count = count.clone();
        move |_: web_sys::Event| count.set(count.get() + delta)
    };

    el("div")
        .class_name("counter")
        .child(el("h2").child("Counter"))
        .child(
            el("p")
                .child("Count: ")
                .child(el("strong").child(dynamic(count.clone().map(|n| text(n))))),
        )
        .child(el("button").on("click", adjust(&count, 1)).child("Increment"))
        .child(el("button").on("click", adjust(&count, -1)).child("Decrement"))
        .child(el("button").on("click", {
            let count = count.clone();
            move |_| count.set(0)
        }).child("Reset"))
        .build()
}

fn input_sync() -> Element {
    let value = binding(String::from("Hello, rivulet!"));

    el("div")
        .class_name("input-sync")
        .child(el("h2").child("Input Sync"))
        .child(
            el("p")
                .child("You typed: ")
                .child(el("strong").child(dynamic(value.clone().map(|v| text(v))))),
        )
        .child(
            el("input")
                .attr("type", "text")
                .bind("value", value.clone().map(Value::from))
                .on("input", move |event| {
                    if let Some(input) = input_element(&event) {
                        value.set(input.value());
                    }
                }),
        )
        .build()
}

fn todo_list() -> Element {
    let todos: Binding<Vec<String>> =
        binding(vec!["Buy milk".into(), "Learn rivulet".into(), "Build app".into()]);
    let draft = binding(String::new());

    let add = {
        let todos = todos.clone();
        let draft = draft.clone();
        move |_: web_sys::Event| {
            let todo: String = draft.get();
            if !todo.trim().is_empty() {
                let mut items = todos.get();
                items.push(todo);
                todos.set(items);
                draft.set(String::new());
            }
        }
    };

    el("div")
        .class_name("todos")
        .child(el("h2").child("Todo List"))
        .child(
            el("div")
                .child(
                    el("input")
                        .attr("type", "text")
                        .bind("value", draft.clone().map(Value::from))
                        .on("input", {
                            let draft = draft.clone();
                            move |event| {
                                if let Some(input) = input_element(&event) {
                                    draft.set(input.value());
                                }
                            }
                        }),
                )
                .child(el("button").on("click", add).child("Add")),
        )
        .child(el("ul").child(dynamic(todos.clone().map({
            let todos = todos.clone();
            move |items| {
                let todos = todos.clone();
                items
                    .into_iter()
                    .enumerate()
                    .map(|(index, item)| {
                        let todos = todos.clone();
                        el("li")
                            .child(text(&item))
                            .child(
                                el("button")
                                    .on("click", move |_| {
                                        let mut items = todos.get();
                                        items.remove(index);
                                        todos.set(items);
                                    })
                                    .child("remove"),
                            )
                            .build()
                    })
                    .collect::<Vec<_>>()
                    .into_element()
            }
        }))))
        .build()
}

fn input_element(event: &web_sys::Event) -> Option<HtmlInputElement> {
    event
        .target()
        .and_then(|target| target.dyn_into::<HtmlInputElement>().ok())
}

fn main() -> Result<(), RenderError> {
    let app = App::new()?;
    app.mount(vec![counter(), input_sync(), todo_list()])?
        .forget();
    Ok(())
}
