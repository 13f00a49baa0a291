/// Runnable scenarios: build a reactor, print its state table, march it in time with the
/// residual and inspect the sparse Jacobian.
/// ```no_run
/// use ZeroDReactors::Examples::reactor_examples::reactor_examples;
/// reactor_examples(0).unwrap();
/// ```
pub mod reactor_examples;
