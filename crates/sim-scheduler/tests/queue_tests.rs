use sim_scheduler::{message_queue, QueueExpired};
use std::thread;

#[derive(Debug, PartialEq)]
enum Message {
    Start,
    Skip(u32),
    Stop,
}

#[test]
fn many_writers_one_reader() {
    let (reader, writer) = message_queue();
    let handles: Vec<_> = (0..4)
        .map(|n| {
            let writer = writer.clone();
            thread::spawn(move || writer.push(Message::Skip(n)))
        })
        .collect();
    for handle in handles {
        assert_eq!(handle.join().unwrap(), Ok(()));
    }

    let mut skips: Vec<_> = reader
        .drain()
        .map(|message| match message {
            Message::Skip(n) => n,
            other => panic!("unexpected {other:?}"),
        })
        .collect();
    skips.sort();
    assert_eq!(skips, vec![0, 1, 2, 3]);
}

#[test]
fn writer_order_is_preserved() {
    let (reader, writer) = message_queue();
    writer.push(Message::Start).unwrap();
    writer.push(Message::Skip(100)).unwrap();
    writer.push(Message::Stop).unwrap();

    let drained: Vec<_> = reader.drain().collect();
    assert_eq!(drained, vec![Message::Start, Message::Skip(100), Message::Stop]);
}

#[test]
fn writers_outliving_reader_expire() {
    let (reader, writer) = message_queue();
    let other = writer.clone();
    drop(reader);

    assert_eq!(writer.push(Message::Start), Err(QueueExpired));
    assert_eq!(other.push(Message::Stop), Err(QueueExpired));
}
