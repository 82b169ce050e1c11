use crate::{
    AtomicCounter, ChunkedCounter, CodeGenerator, CodeParser, CounterGroup, DistributedGenerator,
    Error, LocalCounter, Radix, RoundRobin, ShardLayout, TransformedCounter,
};
use std::collections::{HashSet, VecDeque};
use std::io;
use std::sync::Arc;
use std::sync::Mutex as StdMutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::thread::scope;

/// Counter double returning pre-scripted claim results and counting calls.
struct ScriptedCounter {
    results: StdMutex<VecDeque<Result<u64, io::ErrorKind>>>,
    calls: AtomicUsize,
}

impl ScriptedCounter {
    fn new(results: impl IntoIterator<Item = Result<u64, io::ErrorKind>>) -> Arc<Self> {
        Arc::new(Self {
            results: StdMutex::new(results.into_iter().collect()),
            calls: AtomicUsize::new(0),
        })
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl AtomicCounter for ScriptedCounter {
    type Err = io::Error;

    fn next_count_chunk(&self) -> Result<u64, Self::Err> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.results
            .lock()
            .unwrap()
            .pop_front()
            .expect("unexpected claim")
            .map_err(io::Error::from)
    }
}

/// Wraps a counter and counts how many chunks were claimed through it.
struct CountingCounter<C> {
    inner: C,
    claims: AtomicUsize,
}

impl<C> CountingCounter<C> {
    fn new(inner: C) -> Arc<Self> {
        Arc::new(Self {
            inner,
            claims: AtomicUsize::new(0),
        })
    }

    fn claims(&self) -> usize {
        self.claims.load(Ordering::SeqCst)
    }
}

impl<C: AtomicCounter> AtomicCounter for CountingCounter<C> {
    type Err = C::Err;

    fn next_count_chunk(&self) -> Result<u64, Self::Err> {
        self.claims.fetch_add(1, Ordering::SeqCst);
        self.inner.next_count_chunk()
    }
}

fn bracketed(code: u64) -> String {
    format!("[{code}]")
}

fn never_picked(_: usize) -> usize {
    panic!("no shard should be selected")
}

fn decimal_values(codes: &[String]) -> Vec<u64> {
    codes
        .iter()
        .map(|code| Radix::DECIMAL.parse(code).unwrap())
        .collect()
}

#[test]
fn dispenses_from_current_range_without_claiming() {
    let shard = ScriptedCounter::new([]);
    let generator = DistributedGenerator::from_components(
        ChunkedCounter::from_components(23, 42, 65),
        CounterGroup::new(vec![Arc::clone(&shard)], never_picked),
        bracketed,
    );
    let code = generator.try_generate_code().unwrap();

    assert_eq!(code, "[42]");
    assert_eq!(shard.calls(), 0);
    assert_eq!(
        generator.counter_snapshot(),
        ChunkedCounter::from_components(23, 43, 65)
    );
}

#[test]
fn claims_new_range_when_exhausted() {
    let idle = ScriptedCounter::new([]);
    let busy = ScriptedCounter::new([Ok(100)]);

    let generator = DistributedGenerator::from_components(
        ChunkedCounter::from_components(23, 65, 65),
        CounterGroup::new(vec![Arc::clone(&idle), Arc::clone(&busy)], |_: usize| 1_usize),
        bracketed,
    );
    let code = generator.try_generate_code().unwrap();

    assert_eq!(code, "[100]");
    assert_eq!(idle.calls(), 0);
    assert_eq!(busy.calls(), 1);
    assert_eq!(
        generator.counter_snapshot(),
        ChunkedCounter::from_components(23, 101, 123)
    );
}

#[test]
fn failed_claim_leaves_state_untouched() {
    let shard = ScriptedCounter::new([Err(io::ErrorKind::TimedOut)]);
    let before = ChunkedCounter::from_components(23, 65, 65);

    let generator = DistributedGenerator::from_components(
        before,
        CounterGroup::new(vec![Arc::clone(&shard)], |_: usize| 0_usize),
        |_: u64| -> String { panic!("nothing should be formatted") },
    );
    let result = generator.try_generate_code();

    assert!(matches!(
        result,
        Err(Error::CounterReset(ref e)) if e.kind() == io::ErrorKind::TimedOut
    ));
    assert_eq!(generator.counter_snapshot(), before);
    assert_eq!(shard.calls(), 1);
}

#[test]
fn next_call_retries_a_failed_claim() {
    let shard = ScriptedCounter::new([Err(io::ErrorKind::ConnectionRefused), Ok(500)]);
    let generator = DistributedGenerator::new(
        10,
        CounterGroup::new(vec![Arc::clone(&shard)], |_: usize| 0_usize),
        bracketed,
    );

    assert!(generator.try_generate_code().is_err());
    assert!(generator.counter_snapshot().is_over());
    assert_eq!(generator.try_generate_code().unwrap(), "[500]");
    assert_eq!(generator.try_generate_code().unwrap(), "[501]");
    assert_eq!(shard.calls(), 2);
}

#[test]
fn first_call_always_claims() {
    let shard = ScriptedCounter::new([Ok(0)]);
    let generator = DistributedGenerator::new(
        5,
        CounterGroup::new(vec![Arc::clone(&shard)], |_: usize| 0_usize),
        bracketed,
    );

    assert_eq!(generator.try_generate_code().unwrap(), "[0]");
    assert_eq!(shard.calls(), 1);
}

#[test]
fn claim_at_max_is_dispensed_once_then_claims_again() {
    let shard = ScriptedCounter::new([Ok(u64::MAX), Ok(5)]);
    let generator = DistributedGenerator::new(
        10,
        CounterGroup::new(vec![Arc::clone(&shard)], |_: usize| 0_usize),
        Radix::DECIMAL,
    );

    assert_eq!(generator.try_generate_code().unwrap(), u64::MAX.to_string());
    assert!(generator.counter_snapshot().is_over());
    assert_eq!(generator.try_generate_code().unwrap(), "5");
    assert_eq!(generator.try_generate_code().unwrap(), "6");
    assert_eq!(shard.calls(), 2);
}

#[test]
fn range_cut_short_at_max_is_not_reused() {
    let shard = ScriptedCounter::new([Ok(u64::MAX - 2), Ok(0)]);
    let generator = DistributedGenerator::new(
        10,
        CounterGroup::new(vec![Arc::clone(&shard)], |_: usize| 0_usize),
        Radix::DECIMAL,
    );

    let values = decimal_values(&[
        generator.try_generate_code().unwrap(),
        generator.try_generate_code().unwrap(),
        generator.try_generate_code().unwrap(),
    ]);
    assert_eq!(values, [u64::MAX - 2, u64::MAX - 1, 0]);
    assert_eq!(shard.calls(), 2);
}

#[test]
fn zero_chunk_claims_on_every_call() {
    let shard = CountingCounter::new(LocalCounter::new());
    let generator = DistributedGenerator::new(
        0,
        CounterGroup::new(vec![Arc::clone(&shard)], |_: usize| 0_usize),
        Radix::DECIMAL,
    );

    let codes: Vec<_> = (0..3)
        .map(|_| generator.try_generate_code().unwrap())
        .collect();

    assert_eq!(codes, ["0", "1", "2"]);
    assert_eq!(shard.claims(), 3);
}

#[test]
fn claims_once_per_chunk_right_after_exhaustion() {
    const STEP: u64 = 10;
    let shard = CountingCounter::new(LocalCounter::from_components(0, STEP));
    let generator = DistributedGenerator::new(
        STEP,
        CounterGroup::new(vec![Arc::clone(&shard)], |_: usize| 0_usize),
        Radix::DECIMAL,
    );

    for call in 0..35_u64 {
        generator.try_generate_code().unwrap();
        assert_eq!(
            shard.claims() as u64,
            call / STEP + 1,
            "claims after call {call}"
        );
    }
}

#[test]
fn fixed_selection_of_first_shard() {
    let first = LocalCounter::from_components(0, 10);
    let second = LocalCounter::from_components(1000, 10);
    let generator = DistributedGenerator::new(
        10,
        CounterGroup::new(vec![&first, &second], |_: usize| 0_usize),
        Radix::DECIMAL,
    );

    let codes: Vec<_> = (0..20)
        .map(|_| generator.try_generate_code().unwrap())
        .collect();

    assert_eq!(decimal_values(&codes), (0..20).collect::<Vec<_>>());
    assert_eq!(first.peek(), 20);
    assert_eq!(second.peek(), 1000);
}

#[test]
fn fixed_selection_of_second_shard() {
    let first = LocalCounter::from_components(0, 10);
    let second = LocalCounter::from_components(1000, 10);
    let generator = DistributedGenerator::new(
        10,
        CounterGroup::new(vec![&first, &second], |_: usize| 1_usize),
        Radix::DECIMAL,
    );

    let codes: Vec<_> = (0..20)
        .map(|_| generator.try_generate_code().unwrap())
        .collect();

    assert_eq!(decimal_values(&codes), (1000..1020).collect::<Vec<_>>());
    assert_eq!(first.peek(), 0);
}

#[test]
fn transformed_shards_claim_in_their_namespaces() {
    let layout = ShardLayout::new(2, 10, 1000).unwrap();
    let shards: Vec<_> = (0..layout.shard_count())
        .map(|i| TransformedCounter::new(LocalCounter::new(), layout.transformer(i)))
        .collect();
    let generator = DistributedGenerator::new(
        layout.chunk_size(),
        CounterGroup::new(shards, RoundRobin::new()),
        Radix::DECIMAL,
    );

    let codes: Vec<_> = (0..40)
        .map(|_| generator.try_generate_code().unwrap())
        .collect();

    let want: Vec<u64> = (0..10)
        .chain(1000..1010)
        .chain(10..20)
        .chain(1010..1020)
        .collect();
    assert_eq!(decimal_values(&codes), want);
}

#[cfg(feature = "std")]
#[test]
fn seeded_selection_is_reproducible() {
    use crate::{RngPicker, ShardPicker};

    let generator = DistributedGenerator::new(
        10,
        CounterGroup::new(
            vec![
                LocalCounter::from_components(0, 10),
                LocalCounter::from_components(100, 10),
            ],
            RngPicker::seeded(1),
        ),
        Radix::BASE62,
    );

    let got: Vec<u64> = (0..100)
        .map(|_| {
            let code = generator.try_generate_code().unwrap();
            Radix::BASE62.parse(&code).unwrap()
        })
        .collect();

    let mut picker = RngPicker::seeded(1);
    let mut next = [0_u64, 100];
    let mut shard = 0;
    let mut want = Vec::with_capacity(100);
    for i in 0..100 {
        if i % 10 == 0 {
            shard = picker.pick(2);
        }
        want.push(next[shard]);
        next[shard] += 1;
    }

    assert_eq!(got, want);
}

#[test]
fn codes_are_unique_across_threads() {
    let threads = num_cpus::get().clamp(2, 8);
    const CODES_PER_THREAD: usize = 2000;

    let layout = ShardLayout::new(3, 16, 1 << 40).unwrap();
    let shards: Vec<_> = (0..layout.shard_count())
        .map(|i| TransformedCounter::new(LocalCounter::new(), layout.transformer(i)))
        .collect();
    let generator = DistributedGenerator::new(
        layout.chunk_size(),
        CounterGroup::new(shards, RoundRobin::new()),
        Radix::BASE62,
    );

    let codes: Vec<String> = scope(|s| {
        let handles: Vec<_> = (0..threads)
            .map(|_| {
                let generator = generator.clone();
                s.spawn(move || {
                    (0..CODES_PER_THREAD)
                        .map(|_| generator.try_generate_code().unwrap())
                        .collect::<Vec<_>>()
                })
            })
            .collect();
        handles
            .into_iter()
            .flat_map(|h| h.join().unwrap())
            .collect()
    });

    let values: HashSet<u64> = codes
        .iter()
        .map(|code| Radix::BASE62.parse(code).unwrap())
        .collect();
    assert_eq!(values.len(), threads * CODES_PER_THREAD);
    assert!(values.iter().all(|&v| layout.shard_of(v).is_some()));
}

#[test]
fn clones_share_one_range() {
    let generator = DistributedGenerator::new(
        100,
        CounterGroup::new(vec![LocalCounter::new()], |_: usize| 0_usize),
        Radix::DECIMAL,
    );
    let clone = generator.clone();

    assert_eq!(generator.try_generate_code().unwrap(), "0");
    assert_eq!(clone.try_generate_code().unwrap(), "1");
    assert_eq!(generator.try_generate_code().unwrap(), "2");
}

#[test]
fn usable_through_the_generator_trait() {
    fn create_links<G: CodeGenerator>(generator: &G, count: usize) -> Vec<String> {
        (0..count)
            .map(|_| generator.try_generate_code().unwrap())
            .collect()
    }

    let generator = DistributedGenerator::new(
        2,
        CounterGroup::new(
            vec![LocalCounter::from_components(7, 2)],
            |_: usize| 0_usize,
        ),
        bracketed,
    );

    assert_eq!(create_links(&generator, 3), ["[7]", "[8]", "[9]"]);
}

#[cfg(not(feature = "parking-lot"))]
#[test]
fn panicking_picker_poisons_the_lock() {
    let generator = DistributedGenerator::new(
        10,
        CounterGroup::new(vec![LocalCounter::new()], |_: usize| -> usize {
            panic!("picker failure")
        }),
        Radix::BASE62,
    );

    let poisoner = generator.clone();
    let joined = std::thread::spawn(move || poisoner.try_generate_code()).join();
    assert!(joined.is_err());

    assert!(matches!(
        generator.try_generate_code(),
        Err(Error::LockPoisoned)
    ));
}
