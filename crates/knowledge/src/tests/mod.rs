mod ask_pipeline;
