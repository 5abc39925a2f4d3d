use pinyin_jyutping::{ChunkType, Chunker, TrieBuilder, TrieSegmenter};

fn main() {
    let input = "我有mp3 播放器，在哪儿呢？\u{F900}有此理";
    println!("Input: {}", input);

    let chunker = Chunker::new(input);
    let chunks = chunker.make_chunks();

    println!("\nChunks:");
    for (i, chunk) in chunks.iter().enumerate() {
        println!("  {}: {:?} - type: {:?}", i, chunk.text(input), chunk.chunk_type);
    }

    let han_chunks: Vec<_> = chunks.iter().filter(|c| c.chunk_type == ChunkType::Han).collect();
    println!("\nHan chunks count: {}", han_chunks.len());

    let mut builder = TrieBuilder::new();
    builder.load_word_list("播放器 100 n\n哪儿 300 r\n豈有此理 5 i\n");
    println!("Vocabulary: {} words", builder.trie().len());
    let segmenter = TrieSegmenter::new(builder.build());
    if segmenter.trie().is_empty() {
        println!("Vocabulary is empty, every Han character stands alone");
    }

    println!("\nTokens:");
    for token in segmenter.tokenize(input) {
        println!("  {} ({}, known: {})", token, token.chunk_type.as_str(), token.known);
    }
}
