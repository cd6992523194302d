use criterion::{Criterion, black_box, criterion_group, criterion_main};

use tango::corpus::CorpusStore;
use tango::session::QuizSession;
use tango::typing::{tokenize, validate};

const SENTENCE: &str = "きょうはがっこうでしんぶんをよみました。ちゃんとべんきょうしよう！";

fn bench_tokenize(c: &mut Criterion) {
    c.bench_function("tokenize (mixed kana sentence)", |b| {
        b.iter(|| tokenize(black_box(SENTENCE)))
    });
}

fn bench_keystroke_replay(c: &mut Criterion) {
    let tokens = tokenize("がっこうでしんぶんをよんだ");
    let typed = "gakkoudesinbunnwoyonda";

    c.bench_function("validate replay (22 keystrokes)", |b| {
        b.iter(|| {
            let mut index = 0;
            let mut input = String::new();
            for ch in typed.chars() {
                input.push(ch);
                index = validate(black_box(&tokens), index, &input);
            }
            index
        })
    });
}

fn bench_quiz_init(c: &mut Criterion) {
    let mut store = CorpusStore::new();
    let rows: Vec<[String; 9]> = (1..=2000u32)
        .map(|id| {
            [
                id.to_string(),
                format!("word{id}"),
                format!("definition {id}"),
                String::new(),
                String::new(),
                String::new(),
                "ことば".to_string(),
                (id % 5 + 1).to_string(),
                String::new(),
            ]
        })
        .collect();
    store.load_rows(&rows);
    for id in (1..=2000).step_by(3) {
        store.mark_mastered(id);
    }

    c.bench_function("quiz init + 100 items (2K entries)", |b| {
        b.iter(|| {
            let mut quiz = QuizSession::new(4);
            quiz.init(black_box(&store), 2);
            for _ in 0..100 {
                let _ = quiz.next(&store);
            }
            quiz.active_len()
        })
    });
}

criterion_group!(
    benches,
    bench_tokenize,
    bench_keystroke_replay,
    bench_quiz_init,
);
criterion_main!(benches);
