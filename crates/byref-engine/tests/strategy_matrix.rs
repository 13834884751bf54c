//! Integration tests for the strategy × layout aliasing matrix
//!
//! Every combination forwards `(one, two)` to a target declared as
//! `(&$arg0 = null, $arg1 = null)` that returns `arg0 . arg1` and then
//! overwrites both parameters. The result is always `"onetwo"`; only the
//! frame-reading strategies over declared by-reference slots let the caller
//! see the rewrite of `arg0`, and `arg1` never changes.

use std::sync::Arc;

use byref_engine::{InvocationStrategy, PassthroughFactory, SlotLayout};
use byref_sdk::{
    AbiResult, Arg, ArgFrame, BoundMethod, Callable, Closure, MethodReceiver, NativeError,
    ParameterInfo, Value, VarRef,
};

fn handler_params() -> Vec<ParameterInfo> {
    vec![
        ParameterInfo::new("arg0").by_ref().with_default(Value::Null),
        ParameterInfo::new("arg1").with_default(Value::Null),
    ]
}

fn rewrite(frame: &mut ArgFrame, label: &str) -> Value {
    let (arg0, arg1) = (frame.get(0), frame.get(1));
    let combined = format!("{}{}", arg0, arg1);
    frame.set(0, format!("arg0 @ {}: {}", label, arg0));
    frame.set(1, format!("arg1 @ {}: {}", label, arg1));
    Value::from(combined)
}

struct Handler {
    params: Vec<ParameterInfo>,
}

impl MethodReceiver for Handler {
    fn class_name(&self) -> &str {
        "Handler"
    }

    fn method_parameters(&self, method: &str) -> Option<&[ParameterInfo]> {
        (method == "callback").then_some(self.params.as_slice())
    }

    fn call_method(&self, method: &str, frame: &mut ArgFrame) -> AbiResult<Value> {
        match method {
            "callback" => Ok(rewrite(frame, "callback")),
            _ => Err(NativeError::UnknownMethod {
                class: "Handler".to_string(),
                method: method.to_string(),
            }),
        }
    }
}

fn callback() -> Arc<dyn Callable> {
    let handler = Arc::new(Handler {
        params: handler_params(),
    });
    Arc::new(BoundMethod::new(handler, "callback"))
}

fn closure() -> Arc<dyn Callable> {
    Arc::new(Closure::new(handler_params(), |frame| {
        Ok(rewrite(frame, "closure"))
    }))
}

/// Forward `("one", "two")` and return `(result, var1, var2)`
fn run(
    target: Arc<dyn Callable>,
    strategy: InvocationStrategy,
    layout: SlotLayout,
) -> (Value, Value, Value) {
    let factory = PassthroughFactory::new();
    let passthrough = factory
        .create_passthrough_with(target, strategy, layout)
        .unwrap();
    let var1 = VarRef::new("one");
    let var2 = VarRef::new("two");
    let result = passthrough
        .invoke(&[Arg::var(&var1), Arg::var(&var2)])
        .unwrap();
    (result, var1.get(), var2.get())
}

fn assert_untouched(target: Arc<dyn Callable>, strategy: InvocationStrategy, layout: SlotLayout) {
    let (result, var1, var2) = run(target, strategy, layout);
    assert_eq!(result, Value::from("onetwo"));
    assert_eq!(var1, Value::from("one"));
    assert_eq!(var2, Value::from("two"));
}

fn assert_aliased(
    target: Arc<dyn Callable>,
    strategy: InvocationStrategy,
    layout: SlotLayout,
    label: &str,
) {
    let (result, var1, var2) = run(target, strategy, layout);
    assert_eq!(result, Value::from("onetwo"));
    assert_eq!(var1, Value::from(format!("arg0 @ {}: one", label)));
    assert_eq!(var2, Value::from("two"));
}

// ============================================================================
// Variadic layout: nothing is declared, nothing aliases
// ============================================================================

mod variadic {
    use super::*;

    #[test]
    fn test_generic_with_callback() {
        assert_untouched(callback(), InvocationStrategy::Generic, SlotLayout::Variadic);
    }

    #[test]
    fn test_generic_with_closure() {
        assert_untouched(closure(), InvocationStrategy::Generic, SlotLayout::Variadic);
    }

    #[test]
    fn test_reflective_with_callback() {
        assert_untouched(callback(), InvocationStrategy::Reflective, SlotLayout::Variadic);
    }

    #[test]
    fn test_reflective_with_closure() {
        assert_untouched(closure(), InvocationStrategy::Reflective, SlotLayout::Variadic);
    }

    #[test]
    fn test_frame_with_callback() {
        assert_untouched(
            callback(),
            InvocationStrategy::FrameIntrospection,
            SlotLayout::Variadic,
        );
    }

    #[test]
    fn test_frame_with_closure() {
        assert_untouched(
            closure(),
            InvocationStrategy::FrameIntrospection,
            SlotLayout::Variadic,
        );
    }

    #[test]
    fn test_reflective_frame_with_callback() {
        assert_untouched(
            callback(),
            InvocationStrategy::ReflectiveFrameIntrospection,
            SlotLayout::Variadic,
        );
    }

    #[test]
    fn test_reflective_frame_with_closure() {
        assert_untouched(
            closure(),
            InvocationStrategy::ReflectiveFrameIntrospection,
            SlotLayout::Variadic,
        );
    }
}

// ============================================================================
// Fixed layout: three generic by-reference slots
// ============================================================================

mod fixed {
    use super::*;

    const LAYOUT: SlotLayout = SlotLayout::Fixed(3);

    #[test]
    fn test_generic_with_callback() {
        assert_untouched(callback(), InvocationStrategy::Generic, LAYOUT);
    }

    #[test]
    fn test_generic_with_closure() {
        assert_untouched(closure(), InvocationStrategy::Generic, LAYOUT);
    }

    #[test]
    fn test_reflective_with_callback() {
        assert_untouched(callback(), InvocationStrategy::Reflective, LAYOUT);
    }

    #[test]
    fn test_reflective_with_closure() {
        assert_untouched(closure(), InvocationStrategy::Reflective, LAYOUT);
    }

    #[test]
    fn test_frame_with_callback() {
        assert_aliased(
            callback(),
            InvocationStrategy::FrameIntrospection,
            LAYOUT,
            "callback",
        );
    }

    #[test]
    fn test_frame_with_closure() {
        assert_aliased(
            closure(),
            InvocationStrategy::FrameIntrospection,
            LAYOUT,
            "closure",
        );
    }

    #[test]
    fn test_reflective_frame_with_callback() {
        assert_aliased(
            callback(),
            InvocationStrategy::ReflectiveFrameIntrospection,
            LAYOUT,
            "callback",
        );
    }

    #[test]
    fn test_reflective_frame_with_closure() {
        assert_aliased(
            closure(),
            InvocationStrategy::ReflectiveFrameIntrospection,
            LAYOUT,
            "closure",
        );
    }
}

// ============================================================================
// Mirrored layout: the synthesized signature itself
// ============================================================================

mod mirrored {
    use super::*;

    #[test]
    fn test_default_passthrough_with_callback() {
        let factory = PassthroughFactory::new();
        let passthrough = factory.create_passthrough(callback()).unwrap();
        let var1 = VarRef::new("one");
        let var2 = VarRef::new("two");

        let result = passthrough
            .invoke(&[Arg::var(&var1), Arg::var(&var2)])
            .unwrap();

        assert_eq!(result, Value::from("onetwo"));
        assert_eq!(var1.get(), Value::from("arg0 @ callback: one"));
        assert_eq!(var2.get(), Value::from("two"));
    }

    #[test]
    fn test_default_passthrough_with_closure() {
        assert_aliased(
            closure(),
            InvocationStrategy::ReflectiveFrameIntrospection,
            SlotLayout::Mirrored,
            "closure",
        );
    }

    #[test]
    fn test_every_strategy_keeps_by_value_params_detached() {
        for strategy in InvocationStrategy::ALL {
            let (result, _, var2) = run(closure(), strategy, SlotLayout::Mirrored);
            assert_eq!(result, Value::from("onetwo"), "{}", strategy);
            assert_eq!(var2, Value::from("two"), "{}", strategy);
        }
    }

    #[test]
    fn test_omitted_optional_arguments_take_defaults() {
        let factory = PassthroughFactory::new();
        let passthrough = factory.create_passthrough(closure()).unwrap();
        let var1 = VarRef::new("solo");

        let result = passthrough.invoke(&[Arg::var(&var1)]).unwrap();
        assert_eq!(result, Value::from("solo"));
        assert_eq!(var1.get(), Value::from("arg0 @ closure: solo"));

        let result = passthrough.invoke(&[]).unwrap();
        assert_eq!(result, Value::from(""));
    }
}

// ============================================================================
// Fixed layout narrower than the call
// ============================================================================

mod overflow {
    use super::*;

    #[test]
    fn test_arguments_past_fixed_slots_are_copied() {
        let target: Arc<dyn Callable> = Arc::new(Closure::new(
            vec![
                ParameterInfo::new("a").by_ref(),
                ParameterInfo::new("b").by_ref(),
            ],
            |frame| {
                frame.set(0, "A");
                frame.set(1, "B");
                Ok(Value::Null)
            },
        ));
        let factory = PassthroughFactory::new();
        let passthrough = factory
            .create_passthrough_with(
                target,
                InvocationStrategy::FrameIntrospection,
                SlotLayout::Fixed(1),
            )
            .unwrap();
        let a = VarRef::new("a");
        let b = VarRef::new("b");

        passthrough.invoke(&[Arg::var(&a), Arg::var(&b)]).unwrap();

        assert_eq!(a.get(), Value::from("A"));
        assert_eq!(b.get(), Value::from("b"));
    }
}

// ============================================================================
// General template shape: arity past the packed limit
// ============================================================================

mod general_shape {
    use super::*;
    use byref_engine::forward::TemplateShape;

    const ARITY: usize = 10;
    const BY_REF: [usize; 4] = [0, 3, 6, 9];

    /// Ten parameters, by-reference at 0/3/6/9; writes `i * 100` to each
    fn wide() -> Arc<dyn Callable> {
        let params = (0..ARITY)
            .map(|i| {
                let param = ParameterInfo::new(format!("p{}", i));
                if BY_REF.contains(&i) {
                    param.by_ref()
                } else {
                    param
                }
            })
            .collect();
        Arc::new(Closure::new(params, |frame| {
            for i in 0..ARITY {
                frame.set(i, (i * 100) as i64);
            }
            Ok(Value::Null)
        }))
    }

    fn run_wide(strategy: InvocationStrategy) -> Vec<Value> {
        let factory = PassthroughFactory::new();
        let passthrough = factory
            .create_passthrough_with(wide(), strategy, SlotLayout::Mirrored)
            .unwrap();
        assert!(matches!(
            passthrough.template().shape(),
            TemplateShape::General { .. }
        ));

        let vars: Vec<VarRef> = (0..ARITY).map(|_| VarRef::new(-1)).collect();
        let args: Vec<Arg> = vars.iter().map(Arg::var).collect();
        passthrough.invoke(&args).unwrap();
        vars.iter().map(VarRef::get).collect()
    }

    #[test]
    fn test_frame_strategies_alias_only_by_ref_positions() {
        for strategy in [
            InvocationStrategy::FrameIntrospection,
            InvocationStrategy::ReflectiveFrameIntrospection,
        ] {
            let values = run_wide(strategy);
            for (i, value) in values.iter().enumerate() {
                let expected = if BY_REF.contains(&i) {
                    Value::Int((i * 100) as i64)
                } else {
                    Value::Int(-1)
                };
                assert_eq!(*value, expected, "{} position {}", strategy, i);
            }
        }
    }

    #[test]
    fn test_copying_strategies_alias_nothing() {
        for strategy in [InvocationStrategy::Generic, InvocationStrategy::Reflective] {
            let values = run_wide(strategy);
            assert!(
                values.iter().all(|v| *v == Value::Int(-1)),
                "{}: {:?}",
                strategy,
                values
            );
        }
    }
}
